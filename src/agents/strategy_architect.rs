// src/agents/strategy_architect.rs

use super::{field, list, AgentRole};
use crate::models::company::Company;

pub struct StrategyArchitect;

impl AgentRole for StrategyArchitect {
    type Input = Company;

    fn name() -> &'static str {
        "Strategy Architect"
    }

    fn prompt(company: &Company) -> String {
        format!(
            "You are the Strategy Architect for SwitchON MultiAgent platform.

Based on the following SaaS company data, create a comprehensive Go-To-Market strategy:

Company: {name}
Industry: {industry}
Annual Recurring Revenue (ARR): {arr}
Ideal Customer Profile (ICP): {icp}
Average Ticket Size: {ticket_size}
Current Acquisition Channels: {channels}

Your strategy should include:
1. Target market segments
2. Acquisition strategy
3. Nurturing approach
4. Closing tactics
5. Key performance indicators
6. Revenue targets
7. Timeline for implementation",
            name = company.name,
            industry = field(company.industry.as_deref()),
            arr = field(company.arr),
            icp = field(company.icp.as_deref()),
            ticket_size = field(company.ticket_size),
            channels = list(&company.channels),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[test]
    fn prompt_lists_company_facts() {
        let company = Company {
            id: Uuid::new_v4(),
            name: "Acme Analytics".into(),
            industry: Some("SaaS".into()),
            arr: Some(Decimal::new(1_200_000, 0)),
            icp: None,
            ticket_size: None,
            channels: vec!["email".into(), "linkedin".into()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let prompt = StrategyArchitect::prompt(&company);
        assert!(prompt.contains("Company: Acme Analytics"));
        assert!(prompt.contains("Annual Recurring Revenue (ARR): 1200000"));
        assert!(prompt.contains("Ideal Customer Profile (ICP): Not specified"));
        assert!(prompt.contains("Current Acquisition Channels: email, linkedin"));
        assert!(!prompt.contains("undefined"));
    }
}
