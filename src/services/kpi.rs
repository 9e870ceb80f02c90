// src/services/kpi.rs

use anyhow::anyhow;
use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{
    campaign::{CampaignMetric, CompanyMetricRow},
    lead::Lead,
    meeting::Meeting,
};

/// Leads scoring at or above this count as qualified.
pub const QUALIFIED_LEAD_THRESHOLD: i32 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl Period {
    /// Missing or unrecognised values mean a month.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("day") => Period::Day,
            Some("week") => Period::Week,
            Some("quarter") => Period::Quarter,
            Some("year") => Period::Year,
            _ => Period::Month,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Quarter => "quarter",
            Period::Year => "year",
        }
    }

    pub fn start_from(self, now: DateTime<Utc>) -> DateTime<Utc> {
        let months_back = |n| now.checked_sub_months(Months::new(n)).unwrap_or(now);
        match self {
            Period::Day => now - Duration::days(1),
            Period::Week => now - Duration::days(7),
            Period::Month => months_back(1),
            Period::Quarter => months_back(3),
            Period::Year => months_back(12),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricTotals {
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: i64,
    #[schema(value_type = f64)]
    pub cost: Decimal,
    pub ctr: f64,
    pub conversion_rate: f64,
    #[schema(value_type = f64)]
    pub cpa: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardKpis {
    #[serde(flatten)]
    pub totals: MetricTotals,
    pub leads: usize,
    pub qualified_leads: usize,
    pub meetings: usize,
    pub meeting_conversion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DailyMetric {
    pub date: NaiveDate,
    pub impressions: i32,
    pub clicks: i32,
    pub conversions: i32,
    #[schema(value_type = f64)]
    pub cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPerformance {
    #[serde(flatten)]
    pub totals: MetricTotals,
    pub daily_metrics: Vec<DailyMetric>,
}

fn ratio(numerator: i64, denominator: i64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Fails when the summed cost leaves the `Decimal` range.
pub fn totals<'a>(
    rows: impl IntoIterator<Item = &'a CampaignMetric>,
) -> anyhow::Result<MetricTotals> {
    let (mut impressions, mut clicks, mut conversions, mut cost) = (0i64, 0i64, 0i64, Decimal::ZERO);
    for row in rows {
        impressions += i64::from(row.impressions);
        clicks += i64::from(row.clicks);
        conversions += i64::from(row.conversions);
        cost = cost
            .checked_add(row.cost)
            .ok_or_else(|| anyhow!("metric cost total overflowed"))?;
    }

    let cpa = if conversions == 0 {
        Decimal::ZERO
    } else {
        cost.checked_div(Decimal::from(conversions))
            .ok_or_else(|| anyhow!("cost per acquisition overflowed"))?
    };

    Ok(MetricTotals {
        impressions,
        clicks,
        conversions,
        cost,
        ctr: ratio(clicks, impressions),
        conversion_rate: ratio(conversions, clicks),
        cpa,
    })
}

pub fn dashboard_kpis(
    metrics: &[CompanyMetricRow],
    leads: &[Lead],
    meetings: &[Meeting],
) -> anyhow::Result<DashboardKpis> {
    let qualified_leads = leads
        .iter()
        .filter(|lead| {
            lead.qualification_score
                .is_some_and(|score| score >= QUALIFIED_LEAD_THRESHOLD)
        })
        .count();

    Ok(DashboardKpis {
        totals: totals(metrics.iter().map(|row| &row.metric))?,
        leads: leads.len(),
        qualified_leads,
        meetings: meetings.len(),
        meeting_conversion_rate: ratio(meetings.len() as i64, qualified_leads as i64),
    })
}

/// Totals plus one daily entry per row, in row order.
pub fn campaign_performance(rows: &[CampaignMetric]) -> anyhow::Result<CampaignPerformance> {
    let daily_metrics = rows
        .iter()
        .map(|row| DailyMetric {
            date: row.date,
            impressions: row.impressions,
            clicks: row.clicks,
            conversions: row.conversions,
            cost: row.cost,
        })
        .collect();

    Ok(CampaignPerformance {
        totals: totals(rows)?,
        daily_metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};
    use uuid::Uuid;

    fn metric(day: u32, impressions: i32, clicks: i32, conversions: i32, cost: i64) -> CampaignMetric {
        CampaignMetric {
            id: Uuid::new_v4(),
            campaign_id: Uuid::nil(),
            impressions,
            clicks,
            conversions,
            cost: Decimal::new(cost, 0),
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn lead(score: Option<i32>) -> Lead {
        Lead {
            id: Uuid::new_v4(),
            company_id: Uuid::nil(),
            name: "Lead".into(),
            email: None,
            company: None,
            position: None,
            industry: None,
            company_size: None,
            budget: None,
            pain_points: None,
            qualification_score: score,
            status: "new".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn meeting() -> Meeting {
        Meeting {
            id: Uuid::new_v4(),
            company_id: Uuid::nil(),
            lead_id: None,
            title: "Demo".into(),
            description: None,
            scheduled_at: Utc::now(),
            status: "scheduled".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn totals_sum_and_derive_rates() {
        let rows = [metric(1, 100, 10, 1, 30), metric(2, 50, 5, 1, 40)];
        let t = totals(&rows).unwrap();

        assert_eq!((t.impressions, t.clicks, t.conversions), (150, 15, 2));
        assert_eq!(t.cost, Decimal::new(70, 0));
        assert!((t.ctr - 0.1).abs() < 1e-9);
        assert!((t.conversion_rate - 2.0 / 15.0).abs() < 1e-9);
        assert_eq!(t.cpa, Decimal::new(35, 0));
    }

    #[test]
    fn zero_denominators_give_zero() {
        let t = totals(&[metric(1, 0, 0, 0, 12)]).unwrap();
        assert_eq!(t.ctr, 0.0);
        assert_eq!(t.conversion_rate, 0.0);
        assert_eq!(t.cpa, Decimal::ZERO);

        let empty = totals(std::iter::empty()).unwrap();
        assert_eq!(empty.impressions, 0);
        assert_eq!(empty.cost, Decimal::ZERO);
    }

    #[test]
    fn qualified_leads_use_inclusive_threshold() {
        let leads = [lead(Some(50)), lead(Some(70)), lead(Some(85)), lead(Some(69)), lead(None)];
        let meetings = [meeting(), meeting(), meeting()];

        let kpis = dashboard_kpis(&[], &leads, &meetings).unwrap();
        assert_eq!(kpis.leads, 5);
        assert_eq!(kpis.qualified_leads, 2);
        assert_eq!(kpis.meetings, 3);
        assert!((kpis.meeting_conversion_rate - 1.5).abs() < 1e-9);
    }

    #[test]
    fn meeting_rate_is_zero_without_qualified_leads() {
        let kpis = dashboard_kpis(&[], &[lead(Some(10))], &[meeting()]).unwrap();
        assert_eq!(kpis.meeting_conversion_rate, 0.0);
    }

    #[test]
    fn daily_metrics_keep_row_order_without_gap_filling() {
        let rows = [metric(9, 10, 1, 0, 5), metric(3, 20, 2, 1, 6)];
        let perf = campaign_performance(&rows).unwrap();
        let dates: Vec<u32> = perf.daily_metrics.iter().map(|d| d.date.day()).collect();
        assert_eq!(dates, vec![9, 3]);
        assert_eq!(perf.totals.impressions, 30);
    }

    #[test]
    fn cost_overflow_is_an_error() {
        let mut rows = [metric(1, 10, 1, 1, 0), metric(2, 10, 1, 1, 0)];
        for row in &mut rows {
            row.cost = Decimal::from_str_exact("50000000000000000000000000000").unwrap();
        }

        let err = totals(&rows).unwrap_err();
        assert!(err.to_string().contains("overflowed"));
        assert!(campaign_performance(&rows).is_err());
    }

    #[test]
    fn unknown_period_means_month() {
        assert_eq!(Period::parse(Some("fortnight")), Period::Month);
        assert_eq!(Period::parse(None), Period::Month);
        assert_eq!(Period::parse(Some("quarter")).as_str(), "quarter");

        let now = Utc.with_ymd_and_hms(2025, 5, 31, 12, 0, 0).unwrap();
        assert_eq!(Period::Week.start_from(now), Utc.with_ymd_and_hms(2025, 5, 24, 12, 0, 0).unwrap());
        assert_eq!(Period::Quarter.start_from(now), Utc.with_ymd_and_hms(2025, 2, 28, 12, 0, 0).unwrap());
        assert_eq!(Period::Year.start_from(now), Utc.with_ymd_and_hms(2024, 5, 31, 12, 0, 0).unwrap());
    }

    #[test]
    fn kpis_serialize_flat_in_camel_case() {
        let kpis = dashboard_kpis(&[], &[], &[]).unwrap();
        let json = serde_json::to_value(&kpis).unwrap();
        assert!(json.get("conversionRate").is_some());
        assert!(json.get("qualifiedLeads").is_some());
        assert!(json.get("meetingConversionRate").is_some());
        assert!(json.get("totals").is_none());
    }
}
