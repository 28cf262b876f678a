use std::fmt;
use std::str::FromStr;

use crate::dataset::DatasetKind;

/// The dashboard's pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Filterable table of every claim
    Records,
    /// Claim counts, loss summary and their charts
    Organizations,
    /// Militia losses pie with outside labels
    AffiliationLosses,
    /// Militia vs civilian pie over every distinct claim
    CivilianLosses,
    /// Verdict tally and bar chart
    Verdicts,
    /// Deaths per date, grouped by claim
    Timeline,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Records,
        Page::Organizations,
        Page::AffiliationLosses,
        Page::CivilianLosses,
        Page::Verdicts,
        Page::Timeline,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Records => "Casualty Records",
            Page::Organizations => "Orient Claims Summary",
            Page::AffiliationLosses => "Militia Losses by Orient Affiliation",
            Page::CivilianLosses => "Militant vs Civilian Casualties",
            Page::Verdicts => "Verdicts Summary",
            Page::Timeline => "Deaths Timeline",
        }
    }

    /// Short name used on the command line and for exported file names
    pub fn slug(&self) -> &'static str {
        match self {
            Page::Records => "records",
            Page::Organizations => "organizations",
            Page::AffiliationLosses => "affiliation_losses",
            Page::CivilianLosses => "civilian_losses",
            Page::Verdicts => "verdicts",
            Page::Timeline => "timeline",
        }
    }

    pub fn dataset_kind(&self) -> DatasetKind {
        match self {
            Page::Verdicts | Page::Timeline => DatasetKind::Timeline,
            _ => DatasetKind::Claims,
        }
    }

    /// Whether the page always shows the category/verdict selectors
    pub fn is_filterable(&self) -> bool {
        matches!(self, Page::Records)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Page {
    type Err = String;

    /// Accepts slugs, with `-` or `_` as separator, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Page::ALL
            .into_iter()
            .find(|p| p.slug() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Page::ALL.iter().map(Page::slug).collect();
                format!("unknown page '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}
