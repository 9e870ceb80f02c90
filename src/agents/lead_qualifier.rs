// src/agents/lead_qualifier.rs

use super::{field, AgentRole};
use crate::models::lead::Lead;

pub struct LeadQualifier;

pub struct QualificationRequest {
    pub lead: Lead,
    // Serialized ICP of the company that owns the lead
    pub company_icp: Option<String>,
}

impl AgentRole for LeadQualifier {
    type Input = QualificationRequest;

    fn name() -> &'static str {
        "Lead Qualifier"
    }

    fn prompt(request: &QualificationRequest) -> String {
        let lead = &request.lead;
        format!(
            "You are the Lead Qualifier for SwitchON MultiAgent platform.

Based on the following lead data and the company's Ideal Customer Profile (ICP),
evaluate the lead's qualification score from 0-100:

Lead Data:
Name: {name}
Company: {company}
Position: {position}
Industry: {industry}
Company Size: {company_size}
Budget: {budget}
Pain Points: {pain_points}

Company's ICP:
{icp}

Provide a qualification score and detailed reasoning for your assessment.",
            name = lead.name,
            company = field(lead.company.as_deref()),
            position = field(lead.position.as_deref()),
            industry = field(lead.industry.as_deref()),
            company_size = field(lead.company_size.as_deref()),
            budget = field(lead.budget.as_deref()),
            pain_points = field(lead.pain_points.as_deref()),
            icp = field(request.company_icp.as_deref()),
        )
    }
}

/// Pulls the 0-100 score out of a free-text assessment.
///
/// Prefers the first number following the word "score"; otherwise takes the
/// first number in range anywhere in the text.
pub fn extract_score(assessment: &str) -> Option<i32> {
    let lower = assessment.to_lowercase();
    lower
        .find("score")
        .and_then(|at| first_in_range(&lower[at..]))
        .or_else(|| first_in_range(&lower))
}

fn first_in_range(text: &str) -> Option<i32> {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .filter_map(|run| run.parse::<i32>().ok())
        .find(|n| (0..=100).contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_after_label_wins() {
        let text = "Lead reviewed in 2024.\nQualification score: 85/100\nStrong fit.";
        assert_eq!(extract_score(text), Some(85));
    }

    #[test]
    fn falls_back_to_first_number_in_range() {
        assert_eq!(extract_score("I would rate this lead 42 out of 100."), Some(42));
        assert_eq!(extract_score("Rated 250 then revised to 64"), Some(64));
    }

    #[test]
    fn no_number_means_no_score() {
        assert_eq!(extract_score("Not enough information to decide."), None);
    }
}
