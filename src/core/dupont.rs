//! The three-factor DuPont decomposition of return on equity

use crate::error::{ReportError, ReportResult};
use crate::types::{Denominator, DuPontRatios};

/// Decompose ROE into profit margin, asset turnover and financial leverage.
///
/// Leverage is `total_assets / equity` as given; it is not re-derived from
/// liabilities. Negative inputs pass through and yield signed ratios.
///
/// # Errors
///
/// [`ReportError::DivisionByZero`] when sales, total assets or equity is zero,
/// checked in that order. [`ReportError::NonFiniteRatio`] when a ratio
/// overflows `f64` (e.g. figures of 1e300 against 1e-300).
pub fn compute_dupont(
    net_income: f64,
    sales: f64,
    total_assets: f64,
    equity: f64,
) -> ReportResult<DuPontRatios> {
    if let Some(denominator) = zero_denominator(sales, total_assets, equity) {
        return Err(ReportError::DivisionByZero(denominator));
    }

    let profit_margin = net_income / sales;
    let asset_turnover = sales / total_assets;
    let leverage = total_assets / equity;
    let roe = profit_margin * asset_turnover * leverage;

    for (name, value) in [
        ("Margen_utilidad_neta", profit_margin),
        ("Rotacion_activos", asset_turnover),
        ("Apalancamiento", leverage),
        ("ROE", roe),
    ] {
        if !value.is_finite() {
            return Err(ReportError::NonFiniteRatio(name));
        }
    }

    Ok(DuPontRatios {
        profit_margin,
        asset_turnover,
        leverage,
        roe,
    })
}

/// First zero denominator, if any
pub fn zero_denominator(sales: f64, total_assets: f64, equity: f64) -> Option<Denominator> {
    if sales == 0.0 {
        Some(Denominator::Sales)
    } else if total_assets == 0.0 {
        Some(Denominator::TotalAssets)
    } else if equity == 0.0 {
        Some(Denominator::Equity)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * b.abs().max(1.0)
    }

    #[test]
    fn test_reference_period() {
        let r = compute_dupont(100.0, 1000.0, 5000.0, 2000.0).unwrap();
        assert!(close(r.profit_margin, 0.10));
        assert!(close(r.asset_turnover, 0.20));
        assert!(close(r.leverage, 2.5));
        assert!(close(r.roe, 0.05));
    }

    #[test]
    fn test_each_zero_denominator() {
        assert!(matches!(
            compute_dupont(1.0, 0.0, 1.0, 1.0),
            Err(ReportError::DivisionByZero(Denominator::Sales))
        ));
        assert!(matches!(
            compute_dupont(1.0, 1.0, 0.0, 1.0),
            Err(ReportError::DivisionByZero(Denominator::TotalAssets))
        ));
        assert!(matches!(
            compute_dupont(1.0, 1.0, 1.0, 0.0),
            Err(ReportError::DivisionByZero(Denominator::Equity))
        ));
    }

    #[test]
    fn test_negative_zero_is_zero() {
        assert!(compute_dupont(1.0, -0.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_negative_equity_passes_through() {
        let r = compute_dupont(50.0, 500.0, 1000.0, -250.0).unwrap();
        assert!(close(r.leverage, -4.0));
        assert!(close(r.roe, -0.2));
    }

    #[test]
    fn test_overflowing_ratios_are_errors() {
        assert!(matches!(
            compute_dupont(1e300, 1e-300, 1.0, 1.0),
            Err(ReportError::NonFiniteRatio("Margen_utilidad_neta"))
        ));
        assert!(matches!(
            compute_dupont(1.0, 1e300, 1e-300, 1.0),
            Err(ReportError::NonFiniteRatio("Rotacion_activos"))
        ));
        assert!(matches!(
            compute_dupont(1.0, 1.0, 1e300, 1e-300),
            Err(ReportError::NonFiniteRatio("Apalancamiento"))
        ));
        // every factor finite, product overflows
        assert!(matches!(
            compute_dupont(1e200, 1e-100, 1e-300, 1e-300),
            Err(ReportError::NonFiniteRatio(_))
        ));
    }

    #[test]
    fn test_zero_net_income_is_valid() {
        let r = compute_dupont(0.0, 10.0, 20.0, 5.0).unwrap();
        assert_eq!(r.profit_margin, 0.0);
        assert_eq!(r.roe, 0.0);
    }
}
