//! Lot analytics: six aggregate queries mapped by column name into
//! [`LotAnalytics`].

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::analytics::{
    CarTypeShare, DailyRevenue, HourlyCount, LotAnalytics, LotRevenue, LotSummaryMetrics,
};

/// Analytics for one of the owner's lots. A lot the owner does not hold is
/// `NotFound`; a lot without sessions yields zeros and empty series.
pub async fn get_analytics(
    pool: &PgPool,
    lot_id: i32,
    owner_id: i32,
) -> Result<LotAnalytics, AppError> {
    // Ownership gate: the remaining queries filter by lot only.
    let summary = fetch_summary(pool, lot_id, owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Lot {lot_id} not found")))?;

    let (peak_hours, car_type_counts, revenue_over_time, revenue_comparison, current_day_revenue) = tokio::try_join!(
        fetch_peak_hours(pool, lot_id),
        fetch_car_type_counts(pool, lot_id),
        fetch_revenue_over_time(pool, lot_id),
        fetch_revenue_comparison(pool, owner_id),
        fetch_current_day_revenue(pool, lot_id),
    )?;

    Ok(LotAnalytics {
        cars_parked: summary.cars_parked,
        ongoing_sessions: summary.ongoing_sessions,
        avg_rating: summary.avg_rating,
        avg_hours: summary.avg_hours,
        total_earnings: summary.total_earnings,
        total_sessions: summary.total_sessions,
        avg_session_duration: summary.avg_session_duration,
        returning_customers: summary.returning_customers,
        available_spaces: summary.available_spaces(),
        space_utilization: summary.space_utilization(),
        peak_hours,
        car_type_counts,
        revenue_over_time,
        revenue_comparison,
        current_day_revenue,
    })
}

/// Session aggregates joined onto the lot row, so a lot with no sessions
/// still produces one row of zeros.
async fn fetch_summary(
    pool: &PgPool,
    lot_id: i32,
    owner_id: i32,
) -> Result<Option<LotSummaryMetrics>, AppError> {
    let row = sqlx::query_as::<_, LotSummaryMetrics>(
        r#"
        SELECT
            COUNT(ps.session_id) AS cars_parked,
            COUNT(ps.session_id) FILTER (WHERE ps.out_time IS NULL) AS ongoing_sessions,
            ROUND(AVG(ps.rating), 2)::FLOAT8 AS avg_rating,
            (AVG(EXTRACT(EPOCH FROM (COALESCE(ps.out_time, NOW()) - ps.in_time))) / 3600.0)::FLOAT8 AS avg_hours,
            COALESCE(SUM(ps.charge), 0)::FLOAT8 AS total_earnings,
            COUNT(ps.session_id) FILTER (WHERE ps.out_time IS NOT NULL) AS total_sessions,
            (AVG(EXTRACT(EPOCH FROM (ps.out_time - ps.in_time))) FILTER (WHERE ps.out_time IS NOT NULL) / 60.0)::FLOAT8 AS avg_session_duration,
            COUNT(DISTINCT ps.car_id) AS returning_customers,
            l.space_available,
            l.total_capacity
        FROM lots l
        LEFT JOIN parking_sessions ps ON ps.lot_id = l.lot_id
        WHERE l.lot_id = $1 AND l.lot_owner_id = $2
        GROUP BY l.lot_id, l.space_available, l.total_capacity
        "#,
    )
    .bind(lot_id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Check-ins per hour of day.
async fn fetch_peak_hours(pool: &PgPool, lot_id: i32) -> Result<Vec<HourlyCount>, AppError> {
    let rows = sqlx::query_as::<_, HourlyCount>(
        r#"
        SELECT EXTRACT(HOUR FROM in_time)::INT AS hour, COUNT(*) AS count
        FROM parking_sessions
        WHERE lot_id = $1
        GROUP BY EXTRACT(HOUR FROM in_time)
        ORDER BY hour
        "#,
    )
    .bind(lot_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Share of sessions per car type, in percent.
async fn fetch_car_type_counts(pool: &PgPool, lot_id: i32) -> Result<Vec<CarTypeShare>, AppError> {
    let rows = sqlx::query_as::<_, CarTypeShare>(
        r#"
        SELECT c.type AS car_type,
               (COUNT(*) * 100.0 / SUM(COUNT(*)) OVER ())::FLOAT8 AS percentage
        FROM parking_sessions ps
        JOIN cars c ON c.car_id = ps.car_id
        WHERE ps.lot_id = $1
        GROUP BY c.type
        ORDER BY percentage DESC, c.type
        "#,
    )
    .bind(lot_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Revenue per check-in date.
async fn fetch_revenue_over_time(pool: &PgPool, lot_id: i32) -> Result<Vec<DailyRevenue>, AppError> {
    let rows = sqlx::query_as::<_, DailyRevenue>(
        r#"
        SELECT in_time::DATE AS date, SUM(charge)::FLOAT8 AS revenue
        FROM parking_sessions
        WHERE lot_id = $1
        GROUP BY in_time::DATE
        ORDER BY date
        "#,
    )
    .bind(lot_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Revenue of each of the owner's earning lots, for side-by-side comparison.
async fn fetch_revenue_comparison(pool: &PgPool, owner_id: i32) -> Result<Vec<LotRevenue>, AppError> {
    let rows = sqlx::query_as::<_, LotRevenue>(
        r#"
        SELECT l.lot_id, l.lot_name, SUM(ps.charge)::FLOAT8 AS revenue
        FROM parking_sessions ps
        JOIN lots l ON l.lot_id = ps.lot_id
        WHERE l.lot_owner_id = $1
        GROUP BY l.lot_id, l.lot_name
        HAVING SUM(ps.charge) > 0
        ORDER BY l.lot_id
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Revenue of sessions that both started and ended today; 0 when none did.
async fn fetch_current_day_revenue(pool: &PgPool, lot_id: i32) -> Result<f64, AppError> {
    let revenue = sqlx::query_scalar::<_, Option<f64>>(
        r#"
        SELECT SUM(charge)::FLOAT8
        FROM parking_sessions
        WHERE lot_id = $1
          AND in_time::DATE = CURRENT_DATE
          AND out_time IS NOT NULL
          AND out_time::DATE = CURRENT_DATE
        "#,
    )
    .bind(lot_id)
    .fetch_optional(pool)
    .await?;
    Ok(revenue.flatten().unwrap_or(0.0))
}
