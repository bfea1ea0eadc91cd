use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{InterestError, Result};

/// partial payment that reduces the outstanding principal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartialPayment {
    pub date: NaiveDate,
    pub amount: Money,
}

impl PartialPayment {
    pub fn new(date: NaiveDate, amount: Money) -> Self {
        Self { date, amount }
    }
}

/// validate payments and keep the ones inside `(due_date, payment_date]`,
/// stably sorted ascending by date
pub(crate) fn validate_and_sort(
    payments: &[PartialPayment],
    due_date: NaiveDate,
    payment_date: NaiveDate,
) -> Result<Vec<PartialPayment>> {
    let mut validated = Vec::with_capacity(payments.len());

    for payment in payments {
        if payment.amount <= Money::ZERO {
            return Err(InterestError::InvalidPaymentAmount {
                amount: payment.amount,
            });
        }

        // payments outside the default window carry no interest effect
        if payment.date > due_date && payment.date <= payment_date {
            validated.push(*payment);
        }
    }

    validated.sort_by_key(|p| p.date);
    Ok(validated)
}

/// parse partial payments from untyped JSON: an array of objects with a
/// `date` (YYYY-MM-DD) and a positive `amount`
pub fn payments_from_json(value: &serde_json::Value) -> Result<Vec<PartialPayment>> {
    let entries = value
        .as_array()
        .ok_or_else(|| InterestError::InvalidPaymentFormat {
            message: "expected an array of payment objects".to_string(),
        })?;

    let mut payments = Vec::with_capacity(entries.len());
    for entry in entries {
        let object = entry
            .as_object()
            .ok_or_else(|| InterestError::InvalidPaymentFormat {
                message: "expected an object with date and amount keys".to_string(),
            })?;

        let date_value =
            object
                .get("date")
                .and_then(|v| v.as_str())
                .ok_or_else(|| InterestError::InvalidPaymentFormat {
                    message: "missing or non-string date".to_string(),
                })?;
        let date = NaiveDate::parse_from_str(date_value, "%Y-%m-%d").map_err(|e| {
            InterestError::InvalidPaymentDate {
                message: format!("{date_value:?}: {e}"),
            }
        })?;

        let amount = match object.get("amount") {
            Some(serde_json::Value::Number(n)) => {
                Money::from_str_exact(&n.to_string()).map_err(|e| {
                    InterestError::InvalidPaymentFormat {
                        message: format!("unparseable amount {n}: {e}"),
                    }
                })?
            }
            Some(serde_json::Value::String(s)) => {
                Money::from_str_exact(s).map_err(|e| InterestError::InvalidPaymentFormat {
                    message: format!("unparseable amount {s:?}: {e}"),
                })?
            }
            _ => {
                return Err(InterestError::InvalidPaymentFormat {
                    message: "missing or non-numeric amount".to_string(),
                })
            }
        };
        if amount <= Money::ZERO {
            return Err(InterestError::InvalidPaymentAmount { amount });
        }

        payments.push(PartialPayment::new(date, amount));
    }

    Ok(payments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_out_of_window_payments_dropped() {
        let due = date(2023, 2, 1);
        let paid = date(2023, 6, 1);
        let payments = vec![
            PartialPayment::new(date(2023, 2, 1), Money::from_major(100)), // on due date
            PartialPayment::new(date(2023, 1, 15), Money::from_major(100)), // before due date
            PartialPayment::new(date(2023, 4, 2), Money::from_major(500)),
            PartialPayment::new(date(2023, 6, 1), Money::from_major(50)), // on payment date
            PartialPayment::new(date(2023, 6, 2), Money::from_major(100)), // after payment date
        ];

        let validated = validate_and_sort(&payments, due, paid).unwrap();

        assert_eq!(
            validated,
            vec![
                PartialPayment::new(date(2023, 4, 2), Money::from_major(500)),
                PartialPayment::new(date(2023, 6, 1), Money::from_major(50)),
            ]
        );
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let due = date(2023, 1, 1);
        let paid = date(2023, 12, 31);
        let payments = vec![
            PartialPayment::new(date(2023, 5, 1), Money::from_major(300)),
            PartialPayment::new(date(2023, 3, 1), Money::from_major(100)),
            PartialPayment::new(date(2023, 5, 1), Money::from_major(200)),
        ];

        let validated = validate_and_sort(&payments, due, paid).unwrap();

        assert_eq!(validated[0].amount, Money::from_major(100));
        assert_eq!(validated[1].amount, Money::from_major(300));
        assert_eq!(validated[2].amount, Money::from_major(200));
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let due = date(2023, 1, 1);
        let paid = date(2023, 12, 31);

        // rejected even when the date falls outside the window
        let payments = vec![PartialPayment::new(date(2022, 5, 1), Money::ZERO)];
        assert!(matches!(
            validate_and_sort(&payments, due, paid),
            Err(InterestError::InvalidPaymentAmount { .. })
        ));

        let payments = vec![PartialPayment::new(date(2023, 5, 1), Money::from_major(-10))];
        assert!(matches!(
            validate_and_sort(&payments, due, paid),
            Err(InterestError::InvalidPaymentAmount { .. })
        ));
    }

    #[test]
    fn test_payments_from_json() {
        let value = json!([
            { "date": "2023-04-02", "amount": 500.0 },
            { "date": "2023-05-10", "amount": "250.50" },
        ]);

        let payments = payments_from_json(&value).unwrap();

        assert_eq!(payments.len(), 2);
        assert_eq!(payments[0].date, date(2023, 4, 2));
        assert_eq!(payments[0].amount, Money::from_major(500));
        assert_eq!(payments[1].amount, Money::from_str_exact("250.50").unwrap());
    }

    #[test]
    fn test_payments_from_json_format_errors() {
        assert!(matches!(
            payments_from_json(&json!({ "date": "2023-04-02" })),
            Err(InterestError::InvalidPaymentFormat { .. })
        ));

        assert!(matches!(
            payments_from_json(&json!([{ "amount": 500.0 }])),
            Err(InterestError::InvalidPaymentFormat { .. })
        ));

        assert!(matches!(
            payments_from_json(&json!([{ "date": "02.04.2023", "amount": 500.0 }])),
            Err(InterestError::InvalidPaymentDate { .. })
        ));

        assert!(matches!(
            payments_from_json(&json!([{ "date": "2023-04-02", "amount": -5.0 }])),
            Err(InterestError::InvalidPaymentAmount { .. })
        ));

        assert!(matches!(
            payments_from_json(&json!([{ "date": "2023-04-02", "amount": true }])),
            Err(InterestError::InvalidPaymentFormat { .. })
        ));
    }
}
