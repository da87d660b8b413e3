//! Payslip document layout.

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::calculation::overtime_pay;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Payroll};

use super::currency::format_currency;
use super::pdf::{Align, CellStyle, Font, PdfPage, Rgb, write_document};

const HEADER_FILL: Rgb = Rgb(230, 230, 250);
const GROSS_FILL: Rgb = Rgb(220, 240, 255);
const NET_FILL: Rgb = Rgb(200, 255, 200);

// Table column widths; together they span the 277 mm content width.
const DESCRIPTION_WIDTH: f64 = 120.0;
const QUANTITY_WIDTH: f64 = 70.0;
const AMOUNT_WIDTH: f64 = 87.0;
const TOTAL_LABEL_WIDTH: f64 = DESCRIPTION_WIDTH + QUANTITY_WIDTH;

/// Renders a stored payroll as a single-page landscape PDF payslip.
///
/// Overtime pay is recomputed from the employee's base salary and the stored
/// overtime hours; the basic-plus-allowances line is whatever remains of the
/// stored gross salary. Gross, deductions and net are printed exactly as
/// stored, rounded only for display.
///
/// The line split depends on the employee's current base salary: if it has
/// changed since the payroll was calculated, the overtime and
/// basic-plus-allowances lines shift while their sum stays the stored gross.
///
/// # Errors
///
/// - [`EngineError::SalaryOverflow`] if the recomputed overtime pay overflows
/// - [`EngineError::RenderFailure`] if the document cannot be written
pub fn render_payslip(
    payroll: &Payroll,
    employee: &Employee,
    generated_at: NaiveDateTime,
) -> EngineResult<Vec<u8>> {
    let overtime = overtime_pay(employee.base_salary, payroll.overtime_hours).ok_or_else(|| {
        EngineError::SalaryOverflow {
            employee_id: payroll.employee_id.clone(),
        }
    })?;
    let basic_and_allowances = payroll.gross_salary - overtime;
    let title = format!("PAYSLIP - {}", payroll.month_year.long_label());

    let mut page = PdfPage::a4_landscape();
    let width = page.content_width();

    page.set_font(Font::Bold, 22.0);
    page.cell(width, 20.0, &title, CellStyle::plain(Align::Center), true);
    page.line_feed(5.0);

    page.set_font(Font::Regular, 14.0);
    for (label, value) in [
        ("Full Name:", employee.name.as_str()),
        ("Employee ID:", employee.id.as_str()),
        ("Position:", employee.position.as_str()),
    ] {
        page.cell(60.0, 10.0, label, CellStyle::plain(Align::Left), false);
        page.cell(100.0, 10.0, value, CellStyle::plain(Align::Left), true);
    }
    page.line_feed(5.0);

    page.set_font(Font::Bold, 14.0);
    let header = CellStyle::shaded(Align::Center, HEADER_FILL);
    page.cell(DESCRIPTION_WIDTH, 12.0, "Description", header, false);
    page.cell(QUANTITY_WIDTH, 12.0, "Quantity", header, false);
    page.cell(AMOUNT_WIDTH, 12.0, "Amount (VND)", header, true);

    page.set_font(Font::Regular, 13.0);
    line_item(
        &mut page,
        "Basic Salary + Allowances",
        &format!("{} working days", payroll.working_days),
        basic_and_allowances,
    );
    line_item(
        &mut page,
        "Overtime Pay",
        &format!("{} hours", format_hours(payroll.overtime_hours)),
        overtime,
    );

    page.set_font(Font::Bold, 15.0);
    total_row(&mut page, 15.0, "GROSS SALARY", payroll.gross_salary, Some(GROSS_FILL));
    page.line_feed(5.0);

    page.set_font(Font::Regular, 13.0);
    total_row(&mut page, 12.0, "Deductions", payroll.total_deductions, None);

    page.set_font(Font::Bold, 18.0);
    total_row(&mut page, 20.0, "NET SALARY", payroll.net_salary, Some(NET_FILL));
    page.line_feed(5.0);

    page.set_font(Font::Italic, 11.0);
    let footer = format!(
        "Generated on: {}",
        generated_at.format("%d %B %Y, %H:%M")
    );
    page.cell(width, 10.0, &footer, CellStyle::plain(Align::Right), true);

    let mut document = Vec::new();
    write_document(&page, &title, &mut document)
        .map_err(|source| EngineError::RenderFailure { source })?;
    Ok(document)
}

fn line_item(page: &mut PdfPage, description: &str, quantity: &str, amount: Decimal) {
    page.cell(DESCRIPTION_WIDTH, 10.0, description, CellStyle::boxed(Align::Left), false);
    page.cell(QUANTITY_WIDTH, 10.0, quantity, CellStyle::boxed(Align::Center), false);
    page.cell(
        AMOUNT_WIDTH,
        10.0,
        &format_currency(amount),
        CellStyle::boxed(Align::Right),
        true,
    );
}

fn total_row(page: &mut PdfPage, height: f64, label: &str, amount: Decimal, fill: Option<Rgb>) {
    let (label_style, amount_style) = match fill {
        Some(fill) => (
            CellStyle::shaded(Align::Right, fill),
            CellStyle::shaded(Align::Right, fill),
        ),
        None => (CellStyle::plain(Align::Right), CellStyle::plain(Align::Right)),
    };
    page.cell(TOTAL_LABEL_WIDTH, height, label, label_style, false);
    page.cell(AMOUNT_WIDTH, height, &format_currency(amount), amount_style, true);
}

/// Formats hours with exactly one decimal place.
fn format_hours(hours: Decimal) -> String {
    let rounded = hours.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}", rounded)
}
