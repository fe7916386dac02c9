mod dispatcher;

pub use dispatcher::Dispatcher;

#[cfg(test)]
mod tests;
