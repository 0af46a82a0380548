use std::path::Path;

use crate::ClientResult;
use crate::state::{map_sqlite_error, open_connection};
use crate::triage::types::{PaymentRequest, PaymentStatus, PaymentType};

/// Loads all payment requests in insertion order.
///
/// Rows with an unknown stored type or status are skipped rather than
/// failing the whole load; the filter pipeline downstream is specified as
/// total over whatever list it receives.
pub fn load_requests(db_path: &Path) -> ClientResult<Vec<PaymentRequest>> {
    let connection = open_connection(db_path)?;
    let mut statement = connection
        .prepare(
            "SELECT
                request_id,
                title,
                amount,
                currency,
                payment_type,
                payment_status,
                due_date,
                member
             FROM internal_payment_requests
             ORDER BY rowid ASC",
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let rows_iter = statement
        .query_map([], |row| {
            let request_id: String = row.get(0)?;
            let title: String = row.get(1)?;
            let amount: f64 = row.get(2)?;
            let currency: String = row.get(3)?;
            let payment_type: String = row.get(4)?;
            let payment_status: String = row.get(5)?;
            let due_date: Option<String> = row.get(6)?;
            let member: Option<String> = row.get(7)?;
            Ok((
                request_id,
                title,
                amount,
                currency,
                payment_type,
                payment_status,
                due_date,
                member,
            ))
        })
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut requests: Vec<PaymentRequest> = Vec::new();
    for row in rows_iter {
        let (request_id, title, amount, currency, payment_type, payment_status, due_date, member) =
            row.map_err(|error| map_sqlite_error(db_path, &error))?;

        let Some(parsed_type) = PaymentType::parse(&payment_type) else {
            continue;
        };
        let Some(parsed_status) = PaymentStatus::parse(&payment_status) else {
            continue;
        };

        requests.push(PaymentRequest {
            request_id,
            title: title.trim().to_string(),
            amount,
            currency: currency.trim().to_ascii_uppercase(),
            payment_type: parsed_type,
            payment_status: parsed_status,
            due_date: due_date
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            member: member
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
        });
    }

    Ok(requests)
}
