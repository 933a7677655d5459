//! Serializable views of a workbook read back from disk

use serde::Serialize;
use sheetcraft::{CellAddress, CellValue, Table, Workbook, Worksheet};

#[derive(Debug, Serialize)]
pub struct WorkbookDump {
    pub sheets: Vec<SheetDump>,
}

#[derive(Debug, Serialize)]
pub struct SheetDump {
    pub name: String,
    pub rows: Vec<RowDump>,
    pub tables: Vec<TableDump>,
}

#[derive(Debug, Serialize)]
pub struct RowDump {
    /// 1-based, as shown by spreadsheet applications
    pub number: u32,
    pub cells: Vec<CellDump>,
}

#[derive(Debug, Serialize)]
pub struct CellDump {
    pub address: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TableDump {
    pub name: String,
    pub area: String,
    pub columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub row_stripes: bool,
    pub column_stripes: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_filter: Option<String>,
}

impl WorkbookDump {
    pub fn from_workbook(workbook: &Workbook) -> Self {
        Self {
            sheets: workbook.worksheets().map(SheetDump::from_worksheet).collect(),
        }
    }
}

impl SheetDump {
    fn from_worksheet(sheet: &Worksheet) -> Self {
        let rows = sheet
            .rows()
            .map(|row| RowDump {
                number: row.index() + 1,
                cells: row
                    .cells()
                    .map(|(col, cell)| CellDump::new(CellAddress::new(row.index(), col), &cell.value))
                    .collect(),
            })
            .collect();

        Self {
            name: sheet.name().to_string(),
            rows,
            tables: sheet.tables().iter().map(TableDump::from_table).collect(),
        }
    }
}

impl CellDump {
    fn new(address: CellAddress, value: &CellValue) -> Self {
        let (value, formula) = match value {
            CellValue::Formula { text, cached_value } => (
                cached_value.as_deref().and_then(json_value),
                Some(text.clone()),
            ),
            other => (json_value(other), None),
        };
        Self {
            address: address.to_a1_string(),
            kind: value_kind(formula.is_some(), value.as_ref()),
            value,
            formula,
        }
    }
}

fn value_kind(is_formula: bool, value: Option<&serde_json::Value>) -> &'static str {
    match (is_formula, value) {
        (true, _) => "formula",
        (false, None) => "blank",
        (false, Some(serde_json::Value::Bool(_))) => "boolean",
        (false, Some(serde_json::Value::Number(_))) => "number",
        (false, Some(_)) => "text",
    }
}

fn json_value(value: &CellValue) -> Option<serde_json::Value> {
    match value {
        CellValue::Empty | CellValue::Formula { .. } => None,
        CellValue::Boolean(b) => Some(serde_json::Value::Bool(*b)),
        // Non-finite numbers have no JSON form
        CellValue::Number(n) => serde_json::Number::from_f64(*n).map(serde_json::Value::Number),
        CellValue::String(s) => Some(serde_json::Value::String(s.clone())),
    }
}

impl TableDump {
    fn from_table(table: &Table) -> Self {
        Self {
            name: table.name().to_string(),
            area: table.area().to_a1_string(),
            columns: table.columns().iter().map(|c| c.name.clone()).collect(),
            style: table.style.name.clone(),
            row_stripes: table.style.show_row_stripes,
            column_stripes: table.style.show_column_stripes,
            auto_filter: table.auto_filter.map(|r| r.to_a1_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_dump_json_shape() {
        let mut bytes = Vec::new();
        sheetcraft::build(&mut bytes, |wb| {
            wb.sheet("Data", |sheet| {
                sheet.row(|row| {
                    let a = row.cell(2)?;
                    row.cell(true)?;
                    row.cell(None::<i32>)?;
                    row.formula(&format!("{}*2", a))?;
                    Ok(())
                })?;
                sheet.table(["Name"], |table| table.row(|row| row.cell("x").map(|_| ())))
            })
        })
        .unwrap();
        let workbook = sheetcraft::XlsxReader::read(std::io::Cursor::new(bytes)).unwrap();

        let dump = serde_json::to_value(WorkbookDump::from_workbook(&workbook)).unwrap();
        let sheet = &dump["sheets"][0];

        assert_eq!(sheet["name"], json!("Data"));
        assert_eq!(
            sheet["rows"][0]["cells"],
            json!([
                { "address": "A1", "type": "number", "value": 2.0 },
                { "address": "B1", "type": "boolean", "value": true },
                { "address": "C1", "type": "blank" },
                { "address": "D1", "type": "formula", "formula": "A1*2" },
            ])
        );
        assert_eq!(
            sheet["tables"][0],
            json!({
                "name": "Table1",
                "area": "A2:A3",
                "columns": ["Name"],
                "style": "TableStyleMedium9",
                "row_stripes": false,
                "column_stripes": true,
                "auto_filter": "A2:A3",
            })
        );
    }
}
