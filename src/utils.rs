//! Shutdown handling and display formatting.

use rust_decimal::{Decimal, RoundingStrategy};
use tokio::signal;
use tracing::info;

/// Resolve on Ctrl+C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Shutdown signal received (Ctrl+C)"),
        _ = terminate => info!("Shutdown signal received (SIGTERM)"),
    }
}

/// Dollar amount with two decimals, e.g. `$1,234.50`.
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded);
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

/// Dollar amount with an explicit sign, e.g. `+$25.00` or `-$50.00`.
pub fn format_signed_usd(amount: Decimal) -> String {
    if amount.is_sign_negative() && !amount.is_zero() {
        format_usd(amount)
    } else {
        format!("+{}", format_usd(amount))
    }
}

/// A 0-1 fraction as a whole percentage, e.g. `0.45` -> `45%`.
pub fn format_odds(odds: Decimal) -> String {
    let pct = (odds * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("{}%", pct.normalize())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn usd_has_two_decimals_and_grouping() {
        assert_eq!(format_usd(dec!(0)), "$0.00");
        assert_eq!(format_usd(dec!(12.5)), "$12.50");
        assert_eq!(format_usd(dec!(222.2222)), "$222.22");
        assert_eq!(format_usd(dec!(2205.43)), "$2,205.43");
        assert_eq!(format_usd(dec!(1234567)), "$1,234,567.00");
        assert_eq!(format_usd(dec!(-50)), "-$50.00");
    }

    #[test]
    fn signed_usd() {
        assert_eq!(format_signed_usd(dec!(705.43)), "+$705.43");
        assert_eq!(format_signed_usd(dec!(-25)), "-$25.00");
        assert_eq!(format_signed_usd(dec!(0)), "+$0.00");
    }

    #[test]
    fn odds_as_percent() {
        assert_eq!(format_odds(dec!(0.45)), "45%");
        assert_eq!(format_odds(dec!(0.675)), "68%");
        assert_eq!(format_odds(dec!(1)), "100%");
    }
}
