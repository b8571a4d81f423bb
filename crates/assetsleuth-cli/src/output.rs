/// Renders an analysis tree as a table, CSV or JSON.
///
/// Rows are written in the tree's current display order. Table and CSV use
/// the same cell text a GUI would show; JSON carries the raw sort values so
/// sizes come out in bytes and flags as booleans.
use crate::args::OutputFormat;
use anyhow::Result;
use assetsleuth_core::analysis::AnalysisTree;
use assetsleuth_core::export::ExportReport;
use assetsleuth_core::model::{ProjectPath, SortColumn, SortKey, SortableTree, TreeElement};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Number, Value};
use std::io::Write;

/// Gap between table columns.
const COLUMN_GAP: usize = 2;

/// Write every row of `tree` to `out` in `format`.
pub fn write_tree(tree: &AnalysisTree, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    match tree {
        AnalysisTree::Textures(t) => write_rows(t, format, out),
        AnalysisTree::Audio(t) => write_rows(t, format, out),
        AnalysisTree::Models(t) => write_rows(t, format, out),
        AnalysisTree::BuildLog(t) => write_rows(t, format, out),
    }
}

/// One output column.
#[derive(Clone, Copy)]
enum Field<C> {
    Id,
    Path,
    Column(C),
}

impl<C: Copy> Field<C> {
    fn list<T>() -> Vec<Self>
    where
        C: SortColumn<T>,
    {
        let mut fields = vec![Self::Id];
        fields.extend(<C as SortColumn<T>>::all().iter().map(|&c| Self::Column(c)));
        // Build log rows already show their path as a column.
        if !<C as SortColumn<T>>::all()
            .iter()
            .any(|&c| SortColumn::<T>::id(c) == "path")
        {
            fields.push(Self::Path);
        }
        fields
    }

    fn id<T>(self) -> &'static str
    where
        C: SortColumn<T>,
    {
        match self {
            Self::Id => "id",
            Self::Path => "path",
            Self::Column(c) => c.id(),
        }
    }

    fn title<T>(self) -> &'static str
    where
        C: SortColumn<T>,
    {
        match self {
            Self::Id => "#",
            Self::Path => "Path",
            Self::Column(c) => c.title(),
        }
    }

    fn cell<T: ProjectPath>(self, element: &TreeElement<T>) -> String
    where
        C: SortColumn<T>,
    {
        match self {
            Self::Id => element.id.to_string(),
            Self::Path => element.data.project_path().to_string(),
            Self::Column(c) => c.cell(element),
        }
    }

    fn value<T: ProjectPath>(self, element: &TreeElement<T>) -> Value
    where
        C: SortColumn<T>,
    {
        match self {
            Self::Id => Value::from(element.id),
            Self::Path => Value::from(element.data.project_path()),
            Self::Column(c) => match c.key(element) {
                SortKey::Bool(b) => Value::Bool(b),
                SortKey::Int(i) => Value::from(i),
                SortKey::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
                SortKey::Text(s) => Value::String(s.to_string()),
            },
        }
    }
}

fn write_rows<T: ProjectPath, C: SortColumn<T>>(
    tree: &SortableTree<T, C>,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let fields = Field::<C>::list::<T>();
    match format {
        OutputFormat::Table => write_table(tree, &fields, out),
        OutputFormat::Csv => write_csv(tree, &fields, out),
        OutputFormat::Json => write_json(tree, &fields, out),
    }
}

fn write_table<T: ProjectPath, C: SortColumn<T>>(
    tree: &SortableTree<T, C>,
    fields: &[Field<C>],
    out: &mut dyn Write,
) -> Result<()> {
    let header: Vec<String> = fields.iter().map(|f| f.title::<T>().to_string()).collect();
    let rows: Vec<Vec<String>> = tree
        .row_elements()
        .map(|e| fields.iter().map(|f| f.cell(e)).collect())
        .collect();
    write_aligned(out, &header, &rows)
}

/// Header, dash separator and rows, each column padded to its widest cell.
fn write_aligned(out: &mut dyn Write, header: &[String], rows: &[Vec<String>]) -> Result<()> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_table_line(out, header, &widths)?;
    let separator: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    write_table_line(out, &separator, &widths)?;
    for row in rows {
        write_table_line(out, row, &widths)?;
    }
    Ok(())
}

fn write_table_line(out: &mut dyn Write, cells: &[String], widths: &[usize]) -> Result<()> {
    let last = cells.len().saturating_sub(1);
    let mut line = String::new();
    for (i, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        line.push_str(cell);
        if i < last {
            let pad = width - cell.chars().count() + COLUMN_GAP;
            line.extend(std::iter::repeat(' ').take(pad));
        }
    }
    writeln!(out, "{line}")?;
    Ok(())
}

fn write_csv<T: ProjectPath, C: SortColumn<T>>(
    tree: &SortableTree<T, C>,
    fields: &[Field<C>],
    out: &mut dyn Write,
) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(fields.iter().map(|f| f.id::<T>()))?;
    for element in tree.row_elements() {
        writer.write_record(fields.iter().map(|f| f.cell(element)))?;
    }
    writer.flush()?;
    Ok(())
}

/// A JSON object whose keys keep column order.
struct JsonRow(Vec<(&'static str, Value)>);

impl Serialize for JsonRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

fn write_json<T: ProjectPath, C: SortColumn<T>>(
    tree: &SortableTree<T, C>,
    fields: &[Field<C>],
    out: &mut dyn Write,
) -> Result<()> {
    let rows: Vec<JsonRow> = tree
        .row_elements()
        .map(|e| JsonRow(fields.iter().map(|f| (f.id::<T>(), f.value(e))).collect()))
        .collect();
    serde_json::to_writer_pretty(&mut *out, &rows)?;
    writeln!(out)?;
    Ok(())
}

/// Write an export settings audit as `status, check, detail` rows.
pub fn write_export(report: &ExportReport, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let header: Vec<String> = ["Status", "Check", "Detail"]
                .iter()
                .map(|h| h.to_string())
                .collect();
            let rows: Vec<Vec<String>> = report
                .findings
                .iter()
                .map(|f| {
                    vec![
                        f.status.label().to_string(),
                        f.check.label().to_string(),
                        f.detail.clone(),
                    ]
                })
                .collect();
            write_aligned(out, &header, &rows)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            writer.write_record(["status", "check", "detail"])?;
            for f in &report.findings {
                writer.write_record([f.status.label(), f.check.id(), f.detail.as_str()])?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            let rows: Vec<JsonRow> = report
                .findings
                .iter()
                .map(|f| {
                    JsonRow(vec![
                        ("status", Value::from(f.status.label())),
                        ("check", Value::from(f.check.id())),
                        ("detail", Value::from(f.detail.as_str())),
                    ])
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &rows)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetsleuth_core::model::{BuildLogRecord, SizeUnit, TreeModel};

    fn build_log() -> AnalysisTree {
        let mut rows = vec![TreeElement::root(BuildLogRecord::default())];
        for (id, size, unit, path) in [
            (1, 12.5, SizeUnit::Kb, "Assets/a.png"),
            (2, 1.0, SizeUnit::Mb, "Assets/Textures/b, c.png"),
        ] {
            let record = BuildLogRecord {
                size,
                size_unit: unit,
                size_percentage: 10.0 * id as f64,
                file_path: path.to_string(),
            };
            rows.push(TreeElement::new(path, 0, id, record));
        }
        AnalysisTree::BuildLog(SortableTree::new(TreeModel::build(rows)))
    }

    fn render(tree: &AnalysisTree, format: OutputFormat) -> String {
        let mut out = Vec::new();
        write_tree(tree, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn table_aligns_columns() {
        let text = render(&build_log(), OutputFormat::Table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("#  Size"));
        assert!(lines[1].starts_with("-  ----"));
        // Path column starts at the same offset on every line.
        let offset = lines[0].find("Path").unwrap();
        assert_eq!(&lines[2][offset..], "Assets/a.png");
        assert_eq!(&lines[3][offset..], "Assets/Textures/b, c.png");
    }

    #[test]
    fn build_log_path_is_not_duplicated() {
        let fields = Field::<assetsleuth_core::model::columns::BuildLogColumn>::list::<
            BuildLogRecord,
        >();
        let ids: Vec<&str> = fields.iter().map(|f| f.id::<BuildLogRecord>()).collect();
        assert_eq!(ids, vec!["id", "size", "percentage", "path"]);
    }

    #[test]
    fn csv_quotes_paths_with_commas() {
        let text = render(&build_log(), OutputFormat::Csv);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,size,percentage,path");
        assert!(lines[2].starts_with("2,"));
        assert!(lines[2].ends_with(",\"Assets/Textures/b, c.png\""));
    }

    #[test]
    fn json_carries_raw_values_in_column_order() {
        let text = render(&build_log(), OutputFormat::Json);
        let rows: Vec<serde_json::Map<String, Value>> = serde_json::from_str(&text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], Value::from(1));
        assert_eq!(rows[0]["size"], Value::from(12800.0));
        assert_eq!(rows[1]["size"], Value::from(1_048_576.0));
        assert_eq!(rows[1]["path"], Value::from("Assets/Textures/b, c.png"));

        let id_pos = text.find("\"id\"").unwrap();
        let size_pos = text.find("\"size\"").unwrap();
        let path_pos = text.find("\"path\"").unwrap();
        assert!(id_pos < size_pos && size_pos < path_pos);
    }

    fn export_report() -> ExportReport {
        use assetsleuth_core::export::{CheckStatus, ExportCheck, ExportFinding};
        ExportReport {
            findings: vec![
                ExportFinding {
                    check: ExportCheck::BrotliCompression,
                    status: CheckStatus::Fail,
                    detail: "Gzip; use Brotli".to_string(),
                },
                ExportFinding {
                    check: ExportCheck::StripEngineCode,
                    status: CheckStatus::Ok,
                    detail: "enabled".to_string(),
                },
            ],
        }
    }

    fn render_export(format: OutputFormat) -> String {
        let mut out = Vec::new();
        write_export(&export_report(), format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn export_table_lists_status_first() {
        let text = render_export(OutputFormat::Table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Status  Check"));
        assert!(lines[2].starts_with("FAIL    Brotli compression  Gzip; use Brotli"));
        assert!(lines[3].starts_with("OK      Strip engine code"));
    }

    #[test]
    fn export_csv_and_json_use_check_ids() {
        let csv = render_export(OutputFormat::Csv);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "status,check,detail");
        assert_eq!(lines[1], "FAIL,brotli-compression,Gzip; use Brotli");

        let json = render_export(OutputFormat::Json);
        let rows: Vec<serde_json::Map<String, Value>> = serde_json::from_str(&json).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["status"], "OK");
        assert_eq!(rows[1]["check"], "strip-engine-code");
    }

    #[test]
    fn empty_tree_renders_header_only() {
        let rows = vec![TreeElement::root(BuildLogRecord::default())];
        let tree = AnalysisTree::BuildLog(SortableTree::new(TreeModel::build(rows)));
        assert_eq!(render(&tree, OutputFormat::Table).lines().count(), 2);
        assert_eq!(render(&tree, OutputFormat::Json).trim(), "[]");
    }
}
