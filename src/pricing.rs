use serde::{Deserialize, Serialize};

use crate::entities::{Leg, LegPrice, QuoteBreakdown, QuoteRequest};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RateTable {
    pub per_km: f64,
    pub per_hour_day: f64,
    pub per_hour_evening: f64,
    pub per_hour_weekend: f64,
    pub vat_domestic: f64,
    pub vat_foreign: f64,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            per_km: 9.90,
            per_hour_day: 300.0,
            per_hour_evening: 350.0,
            per_hour_weekend: 400.0,
            vat_domestic: 0.06,
            vat_foreign: 0.0,
        }
    }
}

// rounds to whole cents, half away from zero; the epsilon nudges sums past
// binary representation error before rounding
pub fn round2(x: f64) -> f64 {
    ((x + 1e-9) * 100.0).round() / 100.0
}

impl RateTable {
    pub fn calc_leg_ex_vat(&self, leg: &Leg) -> f64 {
        let km = leg.km.max(0.0);
        let hours_day = leg.hours_day.max(0.0);
        let hours_evening = leg.hours_evening.max(0.0);
        let hours_weekend = leg.hours_weekend.max(0.0);
        let discount = leg.discount.max(0.0);

        let gross = km * self.per_km
            + hours_day * self.per_hour_day
            + hours_evening * self.per_hour_evening
            + hours_weekend * self.per_hour_weekend;

        (gross - discount).max(0.0)
    }

    pub fn calc_quote(&self, request: &QuoteRequest) -> QuoteBreakdown {
        let mut legs = Vec::with_capacity(request.legs.len());
        let mut legs_ex_vat = 0.0;
        let mut legs_vat = 0.0;

        for leg in &request.legs {
            let ex_vat = self.calc_leg_ex_vat(leg);
            let vat_rate = if leg.is_domestic {
                self.vat_domestic
            } else {
                self.vat_foreign
            };
            let vat = ex_vat * vat_rate;

            let price = LegPrice {
                subtotal_ex_vat: round2(ex_vat),
                vat: round2(vat),
                total: round2(ex_vat + vat),
            };

            legs_ex_vat += price.subtotal_ex_vat;
            legs_vat += price.vat;
            legs.push(price);
        }

        let service_fee_ex_vat = round2(request.service_fee.max(0.0));
        // service fees are currently VAT free
        let service_fee_vat = 0.0;
        let service_fee_total = round2(service_fee_ex_vat + service_fee_vat);

        // grand totals sum the already-rounded leg and fee figures, then round
        // again, so the invoice footer always matches its lines to the cent
        let grand_ex_vat = round2(legs_ex_vat + service_fee_ex_vat);
        let grand_vat = round2(legs_vat + service_fee_vat);
        let grand_total = round2(grand_ex_vat + grand_vat);

        QuoteBreakdown {
            legs,
            service_fee_ex_vat,
            service_fee_vat,
            service_fee_total,
            grand_ex_vat,
            grand_vat,
            grand_total,
        }
    }
}

#[cfg(test)]
fn test_rates() -> RateTable {
    RateTable {
        per_km: 9.90,
        per_hour_day: 300.0,
        per_hour_evening: 350.0,
        per_hour_weekend: 400.0,
        vat_domestic: 0.06,
        vat_foreign: 0.0,
    }
}

#[test]
fn base_leg_pricing_test() {
    let rates = test_rates();

    let leg = Leg {
        is_domestic: true,
        km: 100.0,
        hours_day: 2.0,
        hours_evening: 0.0,
        hours_weekend: 0.0,
        discount: 0.0,
    };

    let ex_vat = rates.calc_leg_ex_vat(&leg);
    assert!((ex_vat - 1590.0).abs() < 1e-6);

    let breakdown = rates.calc_quote(&QuoteRequest {
        service_fee: 0.0,
        legs: vec![leg],
    });

    assert_eq!(breakdown.legs[0].subtotal_ex_vat, 1590.0);
    assert_eq!(breakdown.legs[0].vat, 95.4);
    assert_eq!(breakdown.legs[0].total, 1685.4);
}

#[test]
fn round_trip_totals_test() {
    let rates = RateTable {
        per_km: 10.0,
        vat_domestic: 0.06,
        ..test_rates()
    };

    let leg = Leg {
        is_domestic: true,
        km: 100.0,
        hours_day: 0.0,
        hours_evening: 0.0,
        hours_weekend: 0.0,
        discount: 0.0,
    };

    let breakdown = rates.calc_quote(&QuoteRequest {
        service_fee: 500.0,
        legs: vec![leg.clone(), leg],
    });

    assert_eq!(breakdown.legs.len(), 2);
    assert_eq!(breakdown.legs[0].subtotal_ex_vat, 1000.0);
    assert_eq!(breakdown.legs[0].vat, 60.0);
    assert_eq!(breakdown.service_fee_ex_vat, 500.0);
    assert_eq!(breakdown.service_fee_vat, 0.0);
    assert_eq!(breakdown.service_fee_total, 500.0);
    assert_eq!(breakdown.grand_ex_vat, 2500.0);
    assert_eq!(breakdown.grand_vat, 120.0);
    assert_eq!(breakdown.grand_total, 2620.0);
}

#[test]
fn grand_totals_sum_rounded_legs_test() {
    let rates = RateTable {
        per_km: 1.0,
        ..test_rates()
    };

    // each leg prices at 1.006, which rounds up to 1.01 per leg; summing the
    // raw figures first would instead give round2(2.012) = 2.01
    let leg = Leg {
        is_domestic: false,
        km: 1.006,
        hours_day: 0.0,
        hours_evening: 0.0,
        hours_weekend: 0.0,
        discount: 0.0,
    };

    let breakdown = rates.calc_quote(&QuoteRequest {
        service_fee: 0.0,
        legs: vec![leg.clone(), leg],
    });

    assert_eq!(breakdown.legs[0].subtotal_ex_vat, 1.01);
    assert_eq!(breakdown.grand_ex_vat, 2.02);
    assert_eq!(breakdown.grand_total, 2.02);
}

#[test]
fn negative_inputs_clamped_test() {
    let rates = test_rates();

    let leg = Leg {
        is_domestic: true,
        km: -50.0,
        hours_day: -2.0,
        hours_evening: -1.0,
        hours_weekend: -1.0,
        discount: -10.0,
    };

    assert_eq!(rates.calc_leg_ex_vat(&leg), 0.0);

    let breakdown = rates.calc_quote(&QuoteRequest {
        service_fee: 0.0,
        legs: vec![leg],
    });

    assert_eq!(breakdown.legs[0].subtotal_ex_vat, 0.0);
    assert_eq!(breakdown.legs[0].total, 0.0);
}

#[test]
fn discount_never_goes_below_zero_test() {
    let rates = RateTable {
        per_km: 1.0,
        ..test_rates()
    };

    let leg = Leg {
        is_domestic: true,
        km: 10.0,
        hours_day: 0.0,
        hours_evening: 0.0,
        hours_weekend: 0.0,
        discount: 50.0,
    };

    assert_eq!(rates.calc_leg_ex_vat(&leg), 0.0);
}

#[test]
fn discount_applied_before_vat_test() {
    let rates = RateTable {
        per_km: 1.0,
        ..test_rates()
    };

    let leg = Leg {
        is_domestic: true,
        km: 100.0,
        hours_day: 0.0,
        hours_evening: 0.0,
        hours_weekend: 0.0,
        discount: 40.0,
    };

    let breakdown = rates.calc_quote(&QuoteRequest {
        service_fee: 0.0,
        legs: vec![leg],
    });

    assert_eq!(breakdown.legs[0].subtotal_ex_vat, 60.0);
    assert_eq!(breakdown.legs[0].vat, 3.6);
    assert_eq!(breakdown.legs[0].total, 63.6);
}

#[test]
fn foreign_leg_zero_vat_test() {
    let rates = test_rates();

    let leg = Leg {
        is_domestic: false,
        km: 250.0,
        hours_day: 3.0,
        hours_evening: 2.0,
        hours_weekend: 0.0,
        discount: 0.0,
    };

    let breakdown = rates.calc_quote(&QuoteRequest {
        service_fee: 0.0,
        legs: vec![leg],
    });

    assert_eq!(breakdown.legs[0].vat, 0.0);
    assert_eq!(breakdown.legs[0].total, breakdown.legs[0].subtotal_ex_vat);
}

#[test]
fn longer_leg_never_cheaper_test() {
    let rates = test_rates();

    let mut leg = Leg {
        is_domestic: true,
        km: 100.0,
        hours_day: 2.0,
        hours_evening: 1.0,
        hours_weekend: 0.0,
        discount: 75.0,
    };

    let base = rates.calc_leg_ex_vat(&leg);

    leg.km = 101.0;
    assert!(rates.calc_leg_ex_vat(&leg) >= base);

    leg.hours_weekend = 4.0;
    assert!(rates.calc_leg_ex_vat(&leg) >= base);
}

#[test]
fn repeated_calc_identical_test() {
    let rates = test_rates();

    let request = QuoteRequest {
        service_fee: 123.45,
        legs: vec![Leg {
            is_domestic: true,
            km: 417.3,
            hours_day: 5.25,
            hours_evening: 1.5,
            hours_weekend: 0.0,
            discount: 200.0,
        }],
    };

    let first = serde_json::to_string(&rates.calc_quote(&request)).unwrap();
    let second = serde_json::to_string(&rates.calc_quote(&request)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn service_fee_clamped_test() {
    let rates = test_rates();

    let breakdown = rates.calc_quote(&QuoteRequest {
        service_fee: -500.0,
        legs: vec![Leg {
            is_domestic: true,
            km: 10.0,
            hours_day: 0.0,
            hours_evening: 0.0,
            hours_weekend: 0.0,
            discount: 0.0,
        }],
    });

    assert_eq!(breakdown.service_fee_ex_vat, 0.0);
    assert_eq!(breakdown.service_fee_total, 0.0);
}
