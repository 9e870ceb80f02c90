// src/agents/outreach_creator.rs

use super::{field, AgentRole};
use crate::models::lead::Lead;

pub struct OutreachCreator;

pub struct OutreachRequest {
    pub channel: String,
    pub lead: Lead,
    // Content of the company's active strategy
    pub strategy: String,
}

impl AgentRole for OutreachCreator {
    type Input = OutreachRequest;

    fn name() -> &'static str {
        "Outreach Creator"
    }

    fn prompt(request: &OutreachRequest) -> String {
        let lead = &request.lead;
        format!(
            "You are the Outreach Creator for SwitchON MultiAgent platform.

Create personalized outreach content for the following channel: {channel}

Lead Information:
Name: {name}
Company: {company}
Position: {position}
Industry: {industry}
Pain Points: {pain_points}

Strategy Context:
{strategy}

Create compelling, personalized outreach content that aligns with our strategy and addresses the lead's specific pain points.",
            channel = request.channel,
            name = lead.name,
            company = field(lead.company.as_deref()),
            position = field(lead.position.as_deref()),
            industry = field(lead.industry.as_deref()),
            pain_points = field(lead.pain_points.as_deref()),
            strategy = request.strategy,
        )
    }
}
