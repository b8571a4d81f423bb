/// Build-report parser.
///
/// The editor appends a plain-text build report to its log after every
/// build. A session log can hold many of them; only the most recent one is
/// analysed. The asset section looks like:
///
/// ```text
/// Used Assets and files from the Resources folder, sorted by uncompressed size:
///  12.3 kb	 4.5% Assets/Textures/a.png
///  1.0 mb	 10.0% Assets/Models/b.fbx
/// -------------------------------------------------------------------------------
/// ```
///
/// The text comes from a third-party tool, so every line is validated. A
/// line that does not fit the grammar fails the whole report: a garbled
/// asset list means an unsupported log format, and a partial table would
/// misreport what the build contains.
use crate::error::ReportError;
use crate::model::rows::{is_package_path, BuildLogRecord, SizeUnit};
use crate::model::TreeElement;
use compact_str::CompactString;
use tracing::{debug, info};

/// Trailing dashes of the separator line right before the report title.
const DELIMITER_DASHES: &str = "----------------------";
const REPORT_TITLE: &str = "Build Report";
const CATEGORY_HEADER: &str = "Uncompressed usage by category";
const ASSET_SECTION: &str = "Used Assets and files from the Resources folder";

/// Parses the latest build report out of an editor log.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildReportParser {
    include_packages: bool,
}

impl BuildReportParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep rows whose path starts with `Packages/`.
    pub fn include_packages(mut self, include: bool) -> Self {
        self.include_packages = include;
        self
    }

    /// Extract one depth-0 row per asset line of the latest report.
    ///
    /// Ids start at 1 and advance for every asset line, including lines
    /// dropped by the packages filter, so ids stay tied to report lines.
    pub fn parse(&self, log: &str) -> Result<Vec<TreeElement<BuildLogRecord>>, ReportError> {
        let lines: Vec<&str> = log.lines().collect();

        let title = lines
            .windows(2)
            .rposition(|w| w[0].trim_end().ends_with(DELIMITER_DASHES) && w[1].trim() == REPORT_TITLE)
            .map(|i| i + 1)
            .ok_or(ReportError::NotFound)?;

        // Separator lines may sit between the title and the first header.
        let mut cursor = title + 1;
        while cursor < lines.len() && is_blank_or_dashes(lines[cursor]) {
            cursor += 1;
        }
        if !lines
            .get(cursor)
            .is_some_and(|l| l.trim_start().starts_with(CATEGORY_HEADER))
        {
            return Err(ReportError::NotFound);
        }

        let section = lines[cursor..]
            .iter()
            .position(|l| l.trim_start().starts_with(ASSET_SECTION))
            .map(|offset| cursor + offset)
            .ok_or(ReportError::MissingAssetSection)?;

        let mut rows = Vec::new();
        let mut next_id: i32 = 0;
        let mut skipped_packages = 0usize;

        for (offset, raw) in lines[section + 1..].iter().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if is_dash_line(line) {
                info!(
                    rows = rows.len(),
                    skipped_packages, "Parsed build report asset list"
                );
                return Ok(rows);
            }

            next_id += 1;
            let record = parse_asset_line(line).ok_or_else(|| ReportError::MalformedLine {
                line_number: section + 2 + offset,
                line: line.to_string(),
            })?;

            if !self.include_packages && is_package_path(&record.file_path) {
                skipped_packages += 1;
                continue;
            }
            debug!(id = next_id, path = %record.file_path, "Build report row");
            let name = CompactString::from(record.file_name());
            rows.push(TreeElement::new(name, 0, next_id, record));
        }

        Err(ReportError::Unterminated)
    }
}

/// `<size> <unit> <percentage>% <path>`; the path is the rest of the line
/// and may contain spaces.
fn parse_asset_line(line: &str) -> Option<BuildLogRecord> {
    let (size, rest) = next_token(line)?;
    let (unit, rest) = next_token(rest)?;
    let (percentage, rest) = next_token(rest)?;
    let path = rest.trim();
    if path.is_empty() {
        return None;
    }

    let size = parse_number(size).filter(|s| *s >= 0.0)?;
    let size_unit = SizeUnit::from_token(unit)?;
    let size_percentage =
        parse_number(percentage.strip_suffix('%')?).filter(|p| (0.0..=100.0).contains(p))?;

    Some(BuildLogRecord {
        size,
        size_unit,
        size_percentage,
        file_path: path.to_string(),
    })
}

/// Split off the first whitespace-delimited token; the token must be
/// followed by more text.
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    let end = s.find(char::is_whitespace)?;
    Some((&s[..end], &s[end..]))
}

/// Locale-invariant decimal (`.` separator); rejects `inf` and `NaN`.
fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn is_dash_line(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c == '-')
}

fn is_blank_or_dashes(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || is_dash_line(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAGMENT: &str = "----------------------
Build Report
----------------------
Uncompressed usage by category
Used Assets and files from the Resources folder
12.3 kb 4.5% Assets/Textures/a.png
1.0 mb 10.0% Assets/Models/b.fbx
------------
";

    fn records(rows: &[TreeElement<BuildLogRecord>]) -> Vec<&BuildLogRecord> {
        rows.iter().map(|r| &r.data).collect()
    }

    #[test]
    fn parses_the_reference_fragment() {
        let rows = BuildReportParser::new().parse(FRAGMENT).unwrap();
        assert_eq!(rows.len(), 2);

        let a = &rows[0].data;
        assert_eq!(a.size, 12.3);
        assert_eq!(a.size_unit, SizeUnit::Kb);
        assert_eq!(a.size_percentage, 4.5);
        assert_eq!(a.file_path, "Assets/Textures/a.png");
        assert!((a.size_in_bytes() - 12_595.2).abs() < 1e-6);

        let b = &rows[1].data;
        assert_eq!(b.size, 1.0);
        assert_eq!(b.size_unit, SizeUnit::Mb);
        assert_eq!(b.size_percentage, 10.0);
        assert_eq!(b.file_path, "Assets/Models/b.fbx");

        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[1].id, 2);
        assert_eq!(rows[0].name, "a.png");
        assert!(rows.iter().all(|r| r.depth == 0));
    }

    #[test]
    fn real_editor_layout_with_tabs_and_crlf() {
        let log = "Some earlier output\r\n\
-------------------------------------------------------------------------------\r\n\
Build Report\r\n\
Uncompressed usage by category (Percentages based on user generated assets only):\r\n\
Textures               2.1 mb\t 60.0% \r\n\
\r\n\
Used Assets and files from the Resources folder, sorted by uncompressed size:\r\n \
1.3 mb\t 5.3% Assets/Art/My Textures/hero.png\r\n \
0.5 kb\t 0.0% Packages/com.unity.ui/icon.png\r\n \
64.0 kb\t 0.3% Assets/Audio/click.wav\r\n\
-------------------------------------------------------------------------------\r\n";

        let rows = BuildReportParser::new().parse(log).unwrap();
        let paths: Vec<&str> = rows.iter().map(|r| r.data.file_path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["Assets/Art/My Textures/hero.png", "Assets/Audio/click.wav"]
        );
        // The filtered package line still consumed id 2.
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn only_the_last_report_is_used() {
        let older = FRAGMENT.replace("Assets/Textures/a.png", "Assets/Old/old.png");
        let newer = FRAGMENT.replace("12.3 kb", "99.0 kb");
        let log = format!("{older}\nbuild again\n{newer}");
        let rows = BuildReportParser::new().parse(&log).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].data.size, 99.0);
        assert_eq!(rows[0].data.file_path, "Assets/Textures/a.png");
    }

    #[test]
    fn packages_toggle_only_removes_package_rows() {
        let log = FRAGMENT.replace(
            "1.0 mb 10.0% Assets/Models/b.fbx",
            "3.0 kb 1.0% Packages/com.x/p.png\n1.0 mb 10.0% Assets/Models/b.fbx",
        );
        let with = BuildReportParser::new().include_packages(true).parse(&log).unwrap();
        let without = BuildReportParser::new().parse(&log).unwrap();

        assert_eq!(with.len(), 3);
        assert_eq!(with[1].data.file_path, "Packages/com.x/p.png");
        let kept: Vec<_> = with
            .iter()
            .filter(|r| !r.data.file_path.starts_with("Packages/"))
            .cloned()
            .collect();
        assert_eq!(kept, without);
        assert_eq!(records(&without)[1].file_path, "Assets/Models/b.fbx");
        assert_eq!(without[1].id, 3);
    }

    #[test]
    fn missing_report_is_not_found() {
        let err = BuildReportParser::new()
            .parse("Editor started\nNothing built\n")
            .unwrap_err();
        assert!(matches!(err, ReportError::NotFound));
    }

    #[test]
    fn unexpected_header_is_not_found() {
        let log = FRAGMENT.replace("Uncompressed usage by category", "Compressed usage");
        let err = BuildReportParser::new().parse(&log).unwrap_err();
        assert!(matches!(err, ReportError::NotFound));
    }

    #[test]
    fn missing_asset_section() {
        let log = FRAGMENT.replace("Used Assets and files from the Resources folder", "Other");
        let err = BuildReportParser::new().parse(&log).unwrap_err();
        assert!(matches!(err, ReportError::MissingAssetSection));
    }

    #[test]
    fn malformed_line_fails_the_whole_report() {
        let log = FRAGMENT.replace("1.0 mb 10.0%", "1,0 mb 10.0%");
        let err = BuildReportParser::new().parse(&log).unwrap_err();
        match err {
            ReportError::MalformedLine { line_number, line } => {
                assert_eq!(line_number, 7);
                assert!(line.starts_with("1,0 mb"));
            }
            other => panic!("expected MalformedLine, got {other:?}"),
        }
    }

    #[test]
    fn unknown_unit_is_malformed() {
        let log = FRAGMENT.replace("1.0 mb", "1.0 gb");
        assert!(matches!(
            BuildReportParser::new().parse(&log),
            Err(ReportError::MalformedLine { .. })
        ));
    }

    #[test]
    fn missing_terminator_is_unterminated() {
        let log = FRAGMENT.trim_end().trim_end_matches('-');
        assert!(matches!(
            BuildReportParser::new().parse(log),
            Err(ReportError::Unterminated)
        ));
    }

    #[test]
    fn empty_asset_list() {
        let log = "----------------------\nBuild Report\nUncompressed usage by category\n\
Used Assets and files from the Resources folder\n--------\n";
        assert!(BuildReportParser::new().parse(log).unwrap().is_empty());
    }

    #[test]
    fn asset_line_grammar() {
        assert!(parse_asset_line("1.5 kb 2% Assets/a.png").is_some());
        assert!(parse_asset_line("1.5 kb 2% ").is_none());
        assert!(parse_asset_line("NaN kb 2% Assets/a.png").is_none());
        assert!(parse_asset_line("1.5 kb x% Assets/a.png").is_none());
    }

    #[test]
    fn percent_sign_is_required() {
        assert!(parse_asset_line("12.3 kb 4.5 % Assets/a.png").is_none());
        assert!(parse_asset_line("12.3 kb 4.5 Assets/a.png").is_none());

        let log = FRAGMENT.replace("1.0 mb 10.0%", "1.0 mb 10.0 %");
        match BuildReportParser::new().parse(&log) {
            Err(ReportError::MalformedLine { line_number, .. }) => assert_eq!(line_number, 7),
            other => panic!("expected MalformedLine, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_values_are_malformed() {
        assert!(parse_asset_line("-5.0 kb 2.0% Assets/a.png").is_none());
        assert!(parse_asset_line("5.0 kb 250.0% Assets/a.png").is_none());
        assert!(parse_asset_line("5.0 kb -0.1% Assets/a.png").is_none());
        assert!(parse_asset_line("0 kb 0% Assets/a.png").is_some());
        assert!(parse_asset_line("5.0 kb 100% Assets/a.png").is_some());

        for bad in ["-5.0 kb 2.0%", "5.0 kb 250.0%"] {
            let log = FRAGMENT.replace("12.3 kb 4.5%", bad);
            assert!(
                matches!(
                    BuildReportParser::new().parse(&log),
                    Err(ReportError::MalformedLine { line_number: 6, .. })
                ),
                "{bad} should fail the report"
            );
        }
    }
}
