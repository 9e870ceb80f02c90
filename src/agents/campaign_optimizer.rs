// src/agents/campaign_optimizer.rs

use super::{field, AgentRole};
use crate::{models::campaign::Campaign, services::kpi::MetricTotals};

pub struct CampaignOptimizer;

pub struct OptimizationRequest {
    pub campaign: Campaign,
    pub performance: MetricTotals,
}

impl AgentRole for CampaignOptimizer {
    type Input = OptimizationRequest;

    fn name() -> &'static str {
        "Campaign Optimizer"
    }

    fn prompt(request: &OptimizationRequest) -> String {
        let campaign = &request.campaign;
        let performance = &request.performance;
        format!(
            "You are the Campaign Optimizer for SwitchON MultiAgent platform.

Analyze the following campaign performance data and provide optimization recommendations:

Campaign Information:
Name: {name}
Channel: {channel}
Target Audience: {audience}
Content: {content}

Performance Metrics:
Impressions: {impressions}
Click-through Rate: {ctr:.4}
Conversion Rate: {conversion_rate:.4}
Cost per Acquisition: {cpa}

Provide specific recommendations to improve campaign performance, including:
1. Content adjustments
2. Audience targeting refinements
3. Channel optimization
4. A/B testing suggestions",
            name = campaign.name,
            channel = campaign.channel,
            audience = field(campaign.target_audience.as_deref()),
            content = field(campaign.content.as_deref()),
            impressions = performance.impressions,
            ctr = performance.ctr,
            conversion_rate = performance.conversion_rate,
            cpa = performance.cpa.round_dp(2),
        )
    }
}
