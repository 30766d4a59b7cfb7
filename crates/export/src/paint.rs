//! Builds the paint-command list for a receipt view.
//!
//! The structure follows the on-screen receipt: brand header band, title
//! rule, right-aligned USD summary, sender/receiver panels, the transaction
//! details table, the additional payment rows, the complaint footer, and the
//! download control row. The control row is part of the layout only while
//! the controls are visible, so a capture taken under [`crate::CaptureOverrides`]
//! excludes it.

use crate::layout::{text_height, text_width, wrap_text, Rect, MARGIN, NATURAL_WIDTH};
use fp_receipt_core::ReceiptView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const NAVY: Color = Color {
    r: 37,
    g: 59,
    b: 128,
};
pub const WHITE: Color = Color {
    r: 255,
    g: 255,
    b: 255,
};
pub const TEXT_DARK: Color = Color {
    r: 17,
    g: 24,
    b: 39,
};
pub const TEXT_GRAY: Color = Color {
    r: 75,
    g: 85,
    b: 99,
};
pub const BORDER_GRAY: Color = Color {
    r: 209,
    g: 213,
    b: 219,
};

#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    Fill {
        rect: Rect,
        color: Color,
    },
    Border {
        rect: Rect,
        color: Color,
    },
    Text {
        x: u32,
        y: u32,
        text: String,
        scale: u32,
        color: Color,
    },
    /// Diagonal brand stamp blended over the finished page.
    Watermark {
        text: String,
        scale: u32,
        color: Color,
        alpha: f32,
    },
}

/// Finished command list plus the natural pixel size it paints into.
#[derive(Debug, Clone)]
pub struct PaintPlan {
    pub width: u32,
    pub height: u32,
    pub ops: Vec<PaintOp>,
}

const LICENSE_NOTE: &str = "FastPay LLC is licensed as a Money Transmitter by the \
Maryland Office of Financial Regulation. License status may be verified through \
NMLS Consumer Access.";

const COMPLAINT_NOTE: &str = "If you have a complaint, first contact the licensee at \
+1 301-200-7090 / +251 99-549-9844 / support@fastpayet.com. If you still have an \
unresolved complaint, you may contact the Maryland Office of Financial Regulation at \
1100 N. Eutaw Street, Suite 611, Baltimore, Maryland 21201, or visit \
www.labor.maryland.gov/finance.";

struct Painter {
    ops: Vec<PaintOp>,
    y: u32,
}

impl Painter {
    fn fill(&mut self, rect: Rect, color: Color) {
        self.ops.push(PaintOp::Fill { rect, color });
    }

    fn border(&mut self, rect: Rect, color: Color) {
        self.ops.push(PaintOp::Border { rect, color });
    }

    fn hline(&mut self, x: u32, y: u32, width: u32, color: Color) {
        self.fill(Rect::new(x, y, width, 1), color);
    }

    fn text(&mut self, x: u32, y: u32, text: impl Into<String>, scale: u32, color: Color) {
        self.ops.push(PaintOp::Text {
            x,
            y,
            text: text.into(),
            scale,
            color,
        });
    }

    fn text_right(&mut self, right: u32, y: u32, text: &str, scale: u32, color: Color) {
        let x = right.saturating_sub(text_width(text, scale));
        self.text(x, y, text, scale, color);
    }

    fn text_centered(&mut self, x: u32, width: u32, y: u32, text: &str, scale: u32, color: Color) {
        let tw = text_width(text, scale);
        let cx = x + width.saturating_sub(tw) / 2;
        self.text(cx, y, text, scale, color);
    }
}

fn header_band(p: &mut Painter) {
    let band = Rect::new(0, 0, NATURAL_WIDTH, 64);
    p.fill(band, NAVY);

    // Left: brand block.
    p.text(MARGIN, 10, "FastPay", 3, WHITE);
    p.text(MARGIN, 36, "FastPay LLC", 1, WHITE);
    p.text(MARGIN, 48, "Money Transfer Service", 1, WHITE);

    // Center: license note, wrapped to the narrow column.
    let note_x = 320;
    let note_w = 280;
    let mut line_y = 10;
    for line in wrap_text(LICENSE_NOTE, note_w, 1) {
        p.text(note_x, line_y, line, 1, WHITE);
        line_y += text_height(1) + 3;
    }

    // Right: registration identifiers.
    let right = NATURAL_WIDTH - MARGIN;
    p.text_right(right, 10, "NMLS ID: 2327896", 1, WHITE);
    p.text_right(right, 24, "FinCEN ID: 31000249115048", 1, WHITE);
    p.text_right(right, 38, "NBE Approved", 1, WHITE);

    p.y = band.bottom();
}

fn title_rule(p: &mut Painter) {
    p.text_centered(0, NATURAL_WIDTH, p.y + 6, "Transaction Information", 2, TEXT_DARK);
    p.hline(0, p.y + 26, NATURAL_WIDTH, NAVY);
    p.fill(Rect::new(0, p.y + 27, NATURAL_WIDTH, 1), NAVY);
    p.y += 36;
}

fn usd_summary(p: &mut Painter, view: &ReceiptView) {
    let label_x = 552;
    let right = NATURAL_WIDTH - MARGIN;
    let exchange = format!("1 USD = {} ETB", view.exchange_rate);
    let rows: [(&str, &str); 6] = [
        ("Date:", &view.date_time),
        ("Amount USD:", &view.amount_usd),
        ("Fee USD:", &view.fee_usd),
        ("Total Amount USD:", &view.total_amount_usd),
        ("Exchange Rate:", &exchange),
        ("Received Amount ETB:", &view.received_amount),
    ];
    for (label, value) in rows {
        p.text(label_x, p.y + 4, label, 1, TEXT_GRAY);
        p.text_right(right, p.y + 4, value, 1, TEXT_DARK);
        p.y += 16;
    }
    p.y += 8;
}

fn info_panel(p: &mut Painter, x: u32, title: &str, rows: [(&str, &str, Color); 3]) -> u32 {
    let width = 400;
    let header_h = 24;
    let row_h = 36;
    let panel = Rect::new(x, p.y, width, header_h + 8 + 3 * row_h);

    p.fill(Rect::new(x, p.y, width, header_h), NAVY);
    p.text(x + 12, p.y + 8, title, 1, WHITE);

    let mut row_y = p.y + header_h + 8;
    for (label, value, value_color) in rows {
        p.text(x + 12, row_y, label, 1, TEXT_GRAY);
        p.text(x + 12, row_y + 12, value, 2, value_color);
        row_y += row_h;
    }

    p.border(panel, BORDER_GRAY);
    panel.bottom()
}

fn party_panels(p: &mut Painter, view: &ReceiptView) {
    let left_bottom = info_panel(
        p,
        MARGIN,
        "Sender Info",
        [
            ("Sender Name", &view.sender_name, TEXT_DARK),
            ("Phone Number", &view.sender_phone, TEXT_DARK),
            ("Sender Type", &view.sender_type, TEXT_DARK),
        ],
    );
    let right_bottom = info_panel(
        p,
        MARGIN + 400 + 32,
        "Receiver Info",
        [
            ("Receiver Name", &view.receiver_name, TEXT_DARK),
            ("Account Number", &view.account_number, TEXT_DARK),
            ("Transaction Status", &view.transaction_status, NAVY),
        ],
    );
    p.y = left_bottom.max(right_bottom) + 12;
}

fn details_table(p: &mut Painter, view: &ReceiptView) {
    let x = MARGIN;
    let width = NATURAL_WIDTH - 2 * MARGIN;
    let col = width / 3;
    let third_x = x + 2 * col;
    let inner_right = x + width - 10;

    let header_h = 24;
    let head_row_h = 22;
    let value_row_h = 26;
    let charges_h = 44;
    let total_h = 26;
    let table = Rect::new(
        x,
        p.y,
        width,
        header_h + head_row_h + value_row_h + charges_h + total_h,
    );

    p.fill(Rect::new(x, p.y, width, header_h), NAVY);
    p.text_centered(x, width, p.y + 8, "Transaction details", 1, WHITE);

    // Column headers and values.
    let head_y = p.y + header_h;
    for (i, head) in ["Order ID", "Payment date", "Settled Amount"].iter().enumerate() {
        p.text(x + i as u32 * col + 10, head_y + 7, *head, 1, TEXT_DARK);
    }
    p.hline(x, head_y + head_row_h, width, BORDER_GRAY);

    let value_y = head_y + head_row_h;
    p.text(x + 10, value_y + 6, &view.order_id, 2, TEXT_DARK);
    p.text(x + col + 10, value_y + 6, &view.payment_date, 2, TEXT_DARK);
    p.text(third_x + 10, value_y + 6, &view.settled_amount, 2, TEXT_DARK);
    p.hline(x, value_y + value_row_h, width, BORDER_GRAY);

    // Cell separators across the header/value rows.
    let grid_h = head_row_h + value_row_h;
    p.fill(Rect::new(x + col, head_y, 1, grid_h), BORDER_GRAY);
    p.fill(Rect::new(third_x, head_y, 1, grid_h), BORDER_GRAY);

    // Charges and receipt number live in the right column only.
    let charges_y = value_y + value_row_h;
    p.text(third_x + 10, charges_y + 6, "Charges", 1, TEXT_GRAY);
    p.text_right(inner_right, charges_y + 6, &view.charges, 1, TEXT_DARK);
    p.text(third_x + 10, charges_y + 26, "Receipt No.", 1, TEXT_GRAY);
    p.text_right(inner_right, charges_y + 26, &view.receipt_number, 1, TEXT_DARK);
    p.hline(x, charges_y + charges_h, width, BORDER_GRAY);

    let total_y = charges_y + charges_h;
    p.text(third_x + 10, total_y + 9, "Total Amount Paid", 1, TEXT_DARK);
    p.text_right(inner_right, total_y + 6, &view.total_amount_paid, 2, TEXT_DARK);

    p.border(table, BORDER_GRAY);
    p.y = table.bottom() + 12;
}

fn additional_rows(p: &mut Painter, view: &ReceiptView) {
    let rows: [(&str, &str); 5] = [
        ("Total Amount in word", &view.total_amount_in_word),
        ("Destination Country", "Ethiopia"),
        ("Payment Reason", &view.payment_reason),
        ("Payment Channel", &view.payment_channel),
        ("Destination Bank", &view.destination_bank),
    ];
    let value_x = MARGIN + 264;
    for (label, value) in rows {
        p.text(MARGIN, p.y + 6, label, 1, TEXT_GRAY);
        p.text(value_x, p.y + 4, value, 2, TEXT_DARK);
        p.hline(MARGIN, p.y + 21, NATURAL_WIDTH - 2 * MARGIN, BORDER_GRAY);
        p.y += 22;
    }
    p.y += 10;
}

fn footer_note(p: &mut Painter) {
    for line in wrap_text(COMPLAINT_NOTE, 640, 1) {
        p.text_centered(0, NATURAL_WIDTH, p.y, &line, 1, TEXT_GRAY);
        p.y += text_height(1) + 4;
    }
    p.y += 12;
}

fn download_control(p: &mut Painter) {
    let button_w = 200;
    let button_h = 36;
    let x = (NATURAL_WIDTH - button_w) / 2;
    p.fill(Rect::new(x, p.y, button_w, button_h), NAVY);
    p.text_centered(x, button_w, p.y + 11, "Download PDF", 2, WHITE);
    p.y += button_h + 12;
}

/// Paint the receipt at natural size. The download control row is included
/// only while `controls_visible` holds.
pub fn receipt_paint_ops(view: &ReceiptView, controls_visible: bool) -> PaintPlan {
    let mut p = Painter {
        ops: Vec::new(),
        y: 0,
    };

    header_band(&mut p);
    title_rule(&mut p);
    usd_summary(&mut p, view);
    party_panels(&mut p, view);
    details_table(&mut p, view);
    additional_rows(&mut p, view);
    footer_note(&mut p);
    if controls_visible {
        download_control(&mut p);
    }

    p.ops.push(PaintOp::Watermark {
        text: "FASTPAY".to_string(),
        scale: 10,
        color: NAVY,
        alpha: 0.065,
    });

    PaintPlan {
        width: NATURAL_WIDTH,
        height: p.y + MARGIN,
        ops: p.ops,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_receipt_core::{normalize, RawTransaction};

    fn sample_view() -> ReceiptView {
        normalize("FP123", &RawTransaction::default())
    }

    fn texts(plan: &PaintPlan) -> Vec<&str> {
        plan.ops
            .iter()
            .filter_map(|op| match op {
                PaintOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn plan_covers_the_natural_width_and_ends_with_the_watermark() {
        let plan = receipt_paint_ops(&sample_view(), true);
        assert_eq!(plan.width, NATURAL_WIDTH);
        assert!(plan.height > 600);
        assert!(matches!(plan.ops.last(), Some(PaintOp::Watermark { .. })));
    }

    #[test]
    fn hidden_controls_shrink_the_layout_and_drop_the_button() {
        let with = receipt_paint_ops(&sample_view(), true);
        let without = receipt_paint_ops(&sample_view(), false);

        assert!(without.height < with.height);
        assert!(texts(&with).contains(&"Download PDF"));
        assert!(!texts(&without).contains(&"Download PDF"));
    }

    #[test]
    fn view_values_appear_in_the_plan() {
        let plan = receipt_paint_ops(&sample_view(), false);
        let texts = texts(&plan);
        assert!(texts.contains(&"FP123"));
        assert!(texts.contains(&"0 ETB"));
        assert!(texts.contains(&"0%"));
        assert!(texts.contains(&"Ethiopia"));
    }

    #[test]
    fn every_op_stays_inside_the_plan_bounds() {
        let plan = receipt_paint_ops(&sample_view(), true);
        for op in &plan.ops {
            match op {
                PaintOp::Fill { rect, .. } | PaintOp::Border { rect, .. } => {
                    assert!(rect.right() <= plan.width, "{rect:?}");
                    assert!(rect.bottom() <= plan.height, "{rect:?}");
                }
                PaintOp::Text { x, y, .. } => {
                    assert!(*x < plan.width);
                    assert!(*y < plan.height);
                }
                PaintOp::Watermark { .. } => {}
            }
        }
    }
}
