//! Workbook assembly for the weekly inventory report
//!
//! One sheet per month. Each week renders as a header band, a Kg/$
//! sub-header, the four ledger lines, and a TOTAL row whose cells carry a
//! live formula over the four lines above with the ledger's computed value
//! attached as the cached result. The formulas re-encode the reconciliation
//! arithmetic so an auditor can re-derive every total inside the spreadsheet.

use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{
    Color, DocProperties, ExcelDateTime, Format, FormatAlign, Formula, Workbook,
};

use crate::ledger::{MaterialWeek, WeekLedger};
use crate::types::*;
use crate::utils::validation::validate_year;

/// Sheet titles, as the report has always named them.
const MONTH_NAMES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const MONTH_ABBR: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// Rows per rendered week block: header, materials, sub-header, four ledger
/// lines, TOTAL, plus two spacer rows.
const WEEK_BLOCK_ROWS: u32 = 10;

/// First data row on every sheet, below the two title bands.
const FIRST_WEEK_ROW: u32 = 4;

struct Formats {
    title: Format,
    subtitle: Format,
    header: Format,
    label: Format,
    kg: Format,
    amount: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(24)
                .set_font_color(Color::White)
                .set_background_color(Color::Black)
                .set_align(FormatAlign::Center),
            subtitle: Format::new()
                .set_bold()
                .set_font_size(14)
                .set_font_color(Color::White)
                .set_background_color(Color::Black)
                .set_align(FormatAlign::Center),
            header: Format::new()
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(Color::RGB(0xC00000))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            label: Format::new()
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(Color::Black),
            kg: Format::new()
                .set_num_format("#,##0.000")
                .set_font_color(Color::Black)
                .set_background_color(Color::White),
            amount: Format::new()
                .set_num_format("$#,##0.00;-$#,##0.00")
                .set_font_color(Color::Black)
                .set_background_color(Color::RGB(0xBFBFBF)),
        }
    }
}

/// Render a full year of ledger results into xlsx bytes.
///
/// Output is a pure function of the inputs: the document creation timestamp
/// is pinned from the report year, so identical ledger output produces
/// byte-identical files.
pub fn render_inventory_workbook(
    company_name: &str,
    year: i32,
    weeks: &[WeekLedger],
) -> InventoryResult<Vec<u8>> {
    validate_year(year)?;

    let formats = Formats::new();
    let last_col = (Material::ALL.len() * 2) as u16;

    let mut workbook = Workbook::new();
    let created = ExcelDateTime::from_ymd(year as u16, 1, 1)?;
    let properties = DocProperties::new().set_creation_datetime(&created);
    workbook.set_properties(&properties);

    for month in 1..=12u32 {
        let sheet = workbook.add_worksheet();
        sheet.set_name(MONTH_NAMES[(month - 1) as usize])?;

        sheet.merge_range(0, 0, 0, last_col, company_name, &formats.title)?;
        sheet.merge_range(
            1,
            0,
            1,
            last_col,
            &format!("Inventario semanal – Año {year}"),
            &formats.subtitle,
        )?;

        let mut row = FIRST_WEEK_ROW;
        for week in weeks.iter().filter(|w| w.month == month) {
            write_week_block(sheet, row, week, &formats)?;
            row += WEEK_BLOCK_ROWS;
        }

        sheet.set_column_width(0, 22)?;
        for col in 1..=last_col {
            sheet.set_column_width(col, 14)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_week_block(
    sheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    week: &WeekLedger,
    formats: &Formats,
) -> InventoryResult<()> {
    let span = format!(
        "Semana {} ({} - {})",
        week.index,
        day_month(week.range.start),
        day_month(week.range.end)
    );
    sheet.merge_range(row, 1, row, 2, &span, &formats.header)?;

    for (i, material) in Material::ALL.iter().enumerate() {
        let kg_col = (1 + 2 * i) as u16;
        sheet.merge_range(row + 1, kg_col, row + 1, kg_col + 1, material.label(), &formats.header)?;
        sheet.write_string_with_format(row + 2, kg_col, "Kg", &formats.kg)?;
        sheet.write_string_with_format(row + 2, kg_col + 1, "$", &formats.amount)?;
    }

    type LinePick = fn(&MaterialWeek) -> (&BigDecimal, &BigDecimal);
    let lines: [(&str, LinePick); 4] = [
        ("Semana anterior", |m| {
            (&m.previous_week.kgs, &m.previous_week.amount)
        }),
        ("Compras semana", |m| (&m.purchases.kgs, &m.purchases.amount)),
        ("Ventas patio", |m| {
            (&m.patio_sales.kgs, &m.patio_sales.amount)
        }),
        ("Ventas general", |m| {
            (&m.general_sales.kgs, &m.general_sales.amount)
        }),
    ];

    for (offset, (label, pick)) in lines.iter().enumerate() {
        let line_row = row + 3 + offset as u32;
        sheet.write_string_with_format(line_row, 0, *label, &formats.label)?;
        for (i, material) in Material::ALL.iter().enumerate() {
            let kg_col = (1 + 2 * i) as u16;
            let (kgs, amount) = pick(week.material(*material));
            sheet.write_number_with_format(line_row, kg_col, to_cell(kgs, *material)?, &formats.kg)?;
            sheet.write_number_with_format(
                line_row,
                kg_col + 1,
                to_cell(amount, *material)?,
                &formats.amount,
            )?;
        }
    }

    let total_row = row + 7;
    sheet.write_string_with_format(total_row, 0, "TOTAL", &formats.label)?;
    for (i, material) in Material::ALL.iter().enumerate() {
        let kg_col = (1 + 2 * i) as u16;
        let closing = &week.material(*material).closing;
        write_total_cell(sheet, total_row, kg_col, &closing.kgs, *material, &formats.kg)?;
        write_total_cell(
            sheet,
            total_row,
            kg_col + 1,
            &closing.amount,
            *material,
            &formats.amount,
        )?;
    }

    Ok(())
}

/// TOTAL = ventas patio + ventas general - (semana anterior + compras),
/// written as a live formula with the ledger's value as cached result.
fn write_total_cell(
    sheet: &mut rust_xlsxwriter::Worksheet,
    total_row: u32,
    col: u16,
    value: &BigDecimal,
    material: Material,
    format: &Format,
) -> InventoryResult<()> {
    let letter = column_letter(col);
    // 1-indexed rows of the four ledger lines above the TOTAL row.
    let prev = total_row - 3;
    let buys = total_row - 2;
    let patio = total_row - 1;
    let general = total_row;
    let formula = format!("={letter}{patio}+{letter}{general}-({letter}{prev}+{letter}{buys})");

    let cached = to_cell(value, material)?;
    sheet.write_formula_with_format(
        total_row,
        col,
        Formula::new(formula).set_result(cached.to_string()),
        format,
    )?;
    Ok(())
}

fn to_cell(value: &BigDecimal, material: Material) -> InventoryResult<f64> {
    value.to_f64().ok_or_else(|| {
        InventoryError::Render(format!("value for {material} does not fit a spreadsheet cell"))
    })
}

fn day_month(date: NaiveDate) -> String {
    format!("{:02} {}", date.day(), MONTH_ABBR[date.month0() as usize])
}

fn column_letter(col: u16) -> String {
    let mut col = u32::from(col);
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (col % 26) as u8);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).expect("ASCII column letters")
}
