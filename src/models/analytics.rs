//! Lot analytics DTOs. Field names are fixed by the dashboard charts.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// Everything the lot analytics page renders, assembled from six named
/// queries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LotAnalytics {
    pub cars_parked: i64,
    pub ongoing_sessions: i64,
    pub avg_rating: Option<f64>,
    pub avg_hours: Option<f64>,
    pub total_earnings: f64,
    pub total_sessions: i64,
    /// Minutes, completed sessions only.
    pub avg_session_duration: Option<f64>,
    pub returning_customers: i64,
    /// `"available / capacity"`.
    pub available_spaces: String,
    /// Percent of capacity currently occupied.
    pub space_utilization: f64,
    pub peak_hours: Vec<HourlyCount>,
    pub car_type_counts: Vec<CarTypeShare>,
    pub revenue_over_time: Vec<DailyRevenue>,
    pub revenue_comparison: Vec<LotRevenue>,
    pub current_day_revenue: f64,
}

/// Aggregate row for a single lot.
#[derive(Debug, Clone, FromRow)]
pub struct LotSummaryMetrics {
    pub cars_parked: i64,
    pub ongoing_sessions: i64,
    pub avg_rating: Option<f64>,
    pub avg_hours: Option<f64>,
    pub total_earnings: f64,
    pub total_sessions: i64,
    pub avg_session_duration: Option<f64>,
    pub returning_customers: i64,
    pub space_available: i32,
    pub total_capacity: i32,
}

impl LotSummaryMetrics {
    pub fn available_spaces(&self) -> String {
        format!("{} / {}", self.space_available, self.total_capacity)
    }

    pub fn space_utilization(&self) -> f64 {
        if self.total_capacity <= 0 {
            return 0.0;
        }
        let occupied = (self.total_capacity - self.space_available).max(0);
        let pct = f64::from(occupied) * 100.0 / f64::from(self.total_capacity);
        (pct * 100.0).round() / 100.0
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HourlyCount {
    pub hour: i32,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CarTypeShare {
    #[serde(rename = "type")]
    pub car_type: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LotRevenue {
    pub lot_id: i32,
    pub lot_name: String,
    pub revenue: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(space_available: i32, total_capacity: i32) -> LotSummaryMetrics {
        LotSummaryMetrics {
            cars_parked: 0,
            ongoing_sessions: 0,
            avg_rating: None,
            avg_hours: None,
            total_earnings: 0.0,
            total_sessions: 0,
            avg_session_duration: None,
            returning_customers: 0,
            space_available,
            total_capacity,
        }
    }

    #[test]
    fn available_spaces_label() {
        assert_eq!(metrics(12, 60).available_spaces(), "12 / 60");
    }

    #[test]
    fn utilization_percentage() {
        assert_eq!(metrics(60, 60).space_utilization(), 0.0);
        assert_eq!(metrics(15, 60).space_utilization(), 75.0);
        assert_eq!(metrics(2, 3).space_utilization(), 33.33);
        assert_eq!(metrics(0, 0).space_utilization(), 0.0);
    }

    #[test]
    fn chart_field_names() {
        let analytics = LotAnalytics {
            cars_parked: 3,
            ongoing_sessions: 1,
            avg_rating: Some(4.5),
            avg_hours: Some(1.25),
            total_earnings: 30.0,
            total_sessions: 2,
            avg_session_duration: Some(75.0),
            returning_customers: 2,
            available_spaces: "59 / 60".to_string(),
            space_utilization: 1.67,
            peak_hours: vec![HourlyCount { hour: 9, count: 3 }],
            car_type_counts: vec![CarTypeShare {
                car_type: "Sedan".to_string(),
                percentage: 100.0,
            }],
            revenue_over_time: vec![],
            revenue_comparison: vec![LotRevenue {
                lot_id: 1,
                lot_name: "Harbour Front".to_string(),
                revenue: 30.0,
            }],
            current_day_revenue: 0.0,
        };
        let json = serde_json::to_value(&analytics).unwrap();
        assert_eq!(json["carsParked"], 3);
        assert_eq!(json["availableSpaces"], "59 / 60");
        assert_eq!(json["peakHours"][0]["hour"], 9);
        assert_eq!(json["carTypeCounts"][0]["type"], "Sedan");
        assert_eq!(json["revenueComparison"][0]["lotName"], "Harbour Front");
        assert_eq!(json["currentDayRevenue"], 0.0);
        assert!(json["revenueOverTime"].as_array().unwrap().is_empty());
    }
}
