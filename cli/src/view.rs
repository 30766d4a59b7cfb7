//! Plain-text rendering of a receipt for the terminal.

use fp_receipt_core::ReceiptView;

const RULE: &str = "------------------------------------------------------------";

fn row(lines: &mut Vec<String>, label: &str, value: &str) {
    lines.push(format!("  {label:<24} {value}"));
}

fn section(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(format!("  {title}"));
    lines.push(format!("  {RULE}"));
}

/// The receipt as terminal lines, mirroring the printed layout: header,
/// USD summary, sender/receiver, transaction details, payment details.
pub fn receipt_lines(receipt: &ReceiptView) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("  {RULE}"));
    lines.push("  FastPay LLC - Money Transfer Service".to_string());
    lines.push("  NMLS ID: 2327896 | FinCEN ID: 31000249115048 | NBE Approved".to_string());
    lines.push(format!("  {RULE}"));

    section(&mut lines, "Transaction Information");
    row(&mut lines, "Date", &receipt.date_time);
    row(&mut lines, "Amount USD", &receipt.amount_usd);
    row(&mut lines, "Fee USD", &receipt.fee_usd);
    row(&mut lines, "Total Amount USD", &receipt.total_amount_usd);
    row(
        &mut lines,
        "Exchange Rate",
        &format!("1 USD = {} ETB", receipt.exchange_rate),
    );
    row(&mut lines, "Received Amount ETB", &receipt.received_amount);

    section(&mut lines, "Sender Info");
    row(&mut lines, "Sender Name", &receipt.sender_name);
    row(&mut lines, "Phone Number", &receipt.sender_phone);
    row(&mut lines, "Sender Type", &receipt.sender_type);

    section(&mut lines, "Receiver Info");
    row(&mut lines, "Receiver Name", &receipt.receiver_name);
    row(&mut lines, "Account Number", &receipt.account_number);
    row(&mut lines, "Transaction Status", &receipt.transaction_status);

    section(&mut lines, "Transaction details");
    row(&mut lines, "Order ID", &receipt.order_id);
    row(&mut lines, "Payment date", &receipt.payment_date);
    row(&mut lines, "Settled Amount", &receipt.settled_amount);
    row(&mut lines, "Charges", &receipt.charges);
    row(&mut lines, "Receipt No.", &receipt.receipt_number);
    row(&mut lines, "Total Amount Paid", &receipt.total_amount_paid);

    section(&mut lines, "Payment details");
    row(&mut lines, "Total Amount in word", &receipt.total_amount_in_word);
    row(&mut lines, "Payment Mode", &receipt.payment_mode);
    row(&mut lines, "Destination Country", "Ethiopia");
    row(&mut lines, "Payment Reason", &receipt.payment_reason);
    row(&mut lines, "Payment Channel", &receipt.payment_channel);
    row(&mut lines, "Destination Bank", &receipt.destination_bank);

    lines.push(String::new());
    lines.push(
        "  Complaints: +1 301-200-7090 / +251 99-549-9844 / support@fastpayet.com".to_string(),
    );
    lines
}

pub fn print_receipt(receipt: &ReceiptView) {
    for line in receipt_lines(receipt) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_receipt_core::{normalize, RawTransaction};

    #[test]
    fn lines_carry_the_view_values_and_static_rows() {
        let receipt = normalize("FP555", &RawTransaction::default());
        let lines = receipt_lines(&receipt);
        let text = lines.join("\n");

        assert!(text.contains("FP555"));
        assert!(text.contains("0 ETB"));
        assert!(text.contains("0%"));
        assert!(lines
            .iter()
            .any(|l| l.contains("Destination Country") && l.ends_with("Ethiopia")));
        assert!(text.contains("1 USD ="));
    }
}
