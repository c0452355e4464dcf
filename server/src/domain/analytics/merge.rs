//! In-memory merge of trips with their payments and ratings
//!
//! The fan-out strategy fetches payments and ratings as flat lists keyed by
//! trip id. Merging indexes both lists into hash maps and walks the trips
//! once, so the whole merge is O(trips + payments + ratings) regardless of
//! list order.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::data::types::{PaymentRow, RatingRow, TripDetailRow, TripRow};

use super::types::TripDetail;

/// Join payments and ratings onto trips, preserving trip order.
///
/// Trips without a payment get amount 0; trips without a rating get
/// rating 0 and an empty comment.
pub fn merge_trip_details(
    trips: &[TripRow],
    payments: Vec<PaymentRow>,
    ratings: Vec<RatingRow>,
) -> Vec<TripDetail> {
    let payment_by_trip: HashMap<i64, Decimal> =
        payments.into_iter().map(|p| (p.trip_id, p.amount)).collect();
    let rating_by_trip: HashMap<i64, (Decimal, String)> = ratings
        .into_iter()
        .map(|r| (r.trip_id, (r.rating, r.comment)))
        .collect();

    trips
        .iter()
        .map(|trip| {
            let amount = payment_by_trip
                .get(&trip.id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            let (rating, comment) = rating_by_trip
                .get(&trip.id)
                .cloned()
                .unwrap_or((Decimal::ZERO, String::new()));
            TripDetail {
                trip_id: trip.id,
                start_location: trip.start_location.clone(),
                end_location: trip.end_location.clone(),
                trip_date: trip.trip_date,
                amount,
                rating,
                comment,
            }
        })
        .collect()
}

/// Normalize one left-joined row into a `TripDetail`
pub fn detail_from_row(row: TripDetailRow) -> TripDetail {
    TripDetail {
        trip_id: row.trip_id,
        start_location: row.start_location,
        end_location: row.end_location,
        trip_date: row.trip_date,
        amount: row.amount.unwrap_or(Decimal::ZERO),
        rating: row.rating.unwrap_or(Decimal::ZERO),
        comment: row.comment.unwrap_or_default(),
    }
}

/// Sum of payment amounts across the given trips
pub fn total_earnings(details: &[TripDetail]) -> Decimal {
    details.iter().map(|d| d.amount).sum()
}

/// Mean rating over rated trips only, rounded to 2 decimal places.
///
/// Unrated trips (rating 0) are excluded from both the numerator and the
/// denominator. Returns 0 when no trip is rated. Rounding happens once,
/// after the division, so intermediate precision is not lost.
pub fn average_rating(details: &[TripDetail]) -> Decimal {
    let rated: Vec<Decimal> = details
        .iter()
        .filter(|d| d.rating > Decimal::ZERO)
        .map(|d| d.rating)
        .collect();
    if rated.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = rated.iter().copied().sum();
    (sum / Decimal::from(rated.len() as i64)).round_dp(2)
}
