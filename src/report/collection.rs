use super::UrlReport;
use log::warn;
use serde::Serialize;

/// One report per input URL, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReportCollection {
    reports: Vec<UrlReport>,
}

impl ReportCollection {
    /// Builds the collection from reports tagged with their input index.
    ///
    /// Completions arrive in any order. Indices with no report (a task that
    /// died before appending) get a failed report so the collection always
    /// matches `urls` one to one.
    pub fn from_indexed(mut entries: Vec<(usize, UrlReport)>, urls: &[String]) -> Self {
        entries.sort_by_key(|(index, _)| *index);
        entries.dedup_by_key(|(index, _)| *index);

        let mut entries = entries.into_iter().peekable();
        let mut reports = Vec::with_capacity(urls.len());

        for (index, url) in urls.iter().enumerate() {
            match entries.next_if(|(i, _)| *i == index) {
                Some((_, report)) => reports.push(report),
                None => {
                    warn!("No report recorded for {}, marking it aborted", url);
                    reports.push(UrlReport::aborted(url.clone()));
                }
            }
        }

        Self { reports }
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UrlReport> {
        self.reports.iter()
    }

    pub fn succeeded(&self) -> usize {
        self.reports.iter().filter(|r| r.success()).count()
    }

    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }
}

impl<'a> IntoIterator for &'a ReportCollection {
    type Item = &'a UrlReport;
    type IntoIter = std::slice::Iter<'a, UrlReport>;

    fn into_iter(self) -> Self::IntoIter {
        self.reports.iter()
    }
}
