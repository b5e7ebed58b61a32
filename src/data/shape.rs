//! Data shaping: the text pieces the chart derives from the document.

use crate::domain::{CitationPolicy, Dataset};
use crate::error::AppError;

/// Static labels derived from a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartText {
    /// Rotated label next to the y-axis.
    pub series_label: String,
    pub title: String,
    pub citation_line: String,
}

impl ChartText {
    pub fn from_dataset(dataset: &Dataset, policy: CitationPolicy) -> Result<Self, AppError> {
        let citation = match (extract_citation(&dataset.description), policy) {
            (Ok(c), _) => c,
            (Err(err), CitationPolicy::Require) => return Err(err),
            (Err(err), CitationPolicy::Empty) => {
                tracing::warn!("{err}; rendering an empty citation");
                String::new()
            }
        };

        Ok(Self {
            series_label: series_label(&dataset.name).to_string(),
            title: format!("United States {}", dataset.code),
            citation_line: format!("More information: {citation}"),
        })
    }
}

/// The part of the series name before the first comma.
pub fn series_label(name: &str) -> &str {
    name.split(',').next().unwrap_or(name)
}

/// Pull the citation out of a description such as
/// `"... Guide to the National Income and Product Accounts (http://www.bea.gov/national/pdf/nipaguid.pdf)"`.
///
/// The first whitespace-delimited token containing `pdf` (after at least one
/// other character) is cut after its last `pdf`; the citation is what follows
/// the first `(` in it, up to the next `(`.
pub fn extract_citation(description: &str) -> Result<String, AppError> {
    let candidate = description
        .split_whitespace()
        .find_map(|token| match token.rfind("pdf") {
            Some(idx) if idx > 0 => Some(&token[..idx + 3]),
            _ => None,
        })
        .ok_or_else(|| AppError::extraction("No '.pdf' citation found in dataset description."))?;

    candidate
        .split('(')
        .nth(1)
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::extraction(format!("Citation '{candidate}' has no opening parenthesis."))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const BEA: &str = "Units: Billions of Dollars\nSeasonal Adjustment: Seasonally Adjusted Annual Rate\nNotes: A Guide to the National Income and Product Accounts of the United States (NIPA) - (http://www.bea.gov/national/pdf/nipaguid.pdf)";

    #[test]
    fn series_label_before_comma() {
        assert_eq!(series_label("Gross Domestic Product, 1 Decimal"), "Gross Domestic Product");
        assert_eq!(series_label("No comma here"), "No comma here");
        assert_eq!(series_label(""), "");
    }

    #[test]
    fn citation_from_bea_description() {
        assert_eq!(
            extract_citation(BEA).unwrap(),
            "http://www.bea.gov/national/pdf/nipaguid.pdf"
        );
    }

    #[test]
    fn citation_drops_trailing_punctuation() {
        let c = extract_citation("see (http://example.com/x.pdf).").unwrap();
        assert_eq!(c, "http://example.com/x.pdf");
    }

    #[test]
    fn missing_pdf_is_extraction_error() {
        let err = extract_citation("no citation at all").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Extraction);
    }

    #[test]
    fn bare_pdf_word_does_not_count() {
        // `pdf` alone has nothing before it, the next token has no parenthesis.
        let err = extract_citation("pdf http://example.com/a.pdf").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Extraction);
    }

    fn dataset(description: &str) -> Dataset {
        Dataset {
            name: "Gross Domestic Product, USA".to_string(),
            description: description.to_string(),
            code: "GDP".to_string(),
            data: Vec::new(),
        }
    }

    #[test]
    fn chart_text_labels() {
        let text = ChartText::from_dataset(&dataset(BEA), CitationPolicy::Require).unwrap();
        assert_eq!(text.series_label, "Gross Domestic Product");
        assert_eq!(text.title, "United States GDP");
        assert_eq!(
            text.citation_line,
            "More information: http://www.bea.gov/national/pdf/nipaguid.pdf"
        );
    }

    #[test]
    fn citation_policy_controls_missing_citation() {
        let ds = dataset("nothing to cite");
        assert!(ChartText::from_dataset(&ds, CitationPolicy::Require).is_err());
        let text = ChartText::from_dataset(&ds, CitationPolicy::Empty).unwrap();
        assert_eq!(text.citation_line, "More information: ");
    }
}
