// src/services/templates.rs

use serde::Serialize;
use utoipa::ToSchema;

/// Starter outreach copy. `{{lead.*}}` placeholders are filled by the client.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContentTemplate {
    #[schema(value_type = String, example = "email-1")]
    pub id: &'static str,
    #[schema(value_type = String)]
    pub name: &'static str,
    #[schema(value_type = String)]
    pub template: &'static str,
}

const EMAIL: &[ContentTemplate] = &[
    ContentTemplate {
        id: "email-1",
        name: "Problem-Solution Email",
        template: "Subject: Solve [Pain Point] with [Solution]

Hi {{lead.name}},

I noticed that {{lead.company}} might be experiencing [specific pain point based on research].

At [Your Company], we've helped companies like {{lead.company}} achieve [specific result] by [brief solution description].

Would you be open to a quick 15-minute call to discuss how we might be able to help {{lead.company}} with [pain point]?

Best regards,
[Your Name]",
    },
    ContentTemplate {
        id: "email-2",
        name: "Value Proposition Email",
        template: "Subject: [Specific Value] for {{lead.company}}

Hi {{lead.name}},

I'm reaching out because we've helped [similar companies] achieve [specific metric improvement] through our [product/service].

Given your role at {{lead.company}}, I thought you might be interested in how we could help you:

1. [Benefit 1]
2. [Benefit 2]
3. [Benefit 3]

I'd love to share some specific ideas for {{lead.company}}. Would you be available for a brief call next week?

Best regards,
[Your Name]",
    },
];

const LINKEDIN: &[ContentTemplate] = &[
    ContentTemplate {
        id: "linkedin-1",
        name: "Connection Request",
        template: "Hi {{lead.name}},

I came across your profile and was impressed by your work at {{lead.company}}. I'd love to connect and learn more about your experience in [industry/role].

[Brief personalized note based on their profile]

Looking forward to connecting!",
    },
    ContentTemplate {
        id: "linkedin-2",
        name: "Follow-up Message",
        template: "Hi {{lead.name}},

Thanks for connecting! I noticed that {{lead.company}} is [observation from research].

At [Your Company], we specialize in helping companies like yours with [value proposition].

Would you be interested in a quick conversation about how we might be able to help {{lead.company}} with [specific challenge]?

Best regards,
[Your Name]",
    },
];

const SMS: &[ContentTemplate] = &[
    ContentTemplate {
        id: "sms-1",
        name: "Event Invitation",
        template: "Hi {{lead.name}}, this is [Your Name] from [Your Company]. We're hosting a webinar on [topic] that I thought might interest you given your work at {{lead.company}}. Would you like me to send you the details?",
    },
    ContentTemplate {
        id: "sms-2",
        name: "Quick Follow-up",
        template: "Hi {{lead.name}}, just following up on our conversation about [topic]. I have some insights specific to {{lead.company}} that I'd love to share. When would be a good time to connect?",
    },
];

pub fn templates_for(channel: &str) -> Option<&'static [ContentTemplate]> {
    match channel {
        "email" => Some(EMAIL),
        "linkedin" => Some(LINKEDIN),
        "sms" => Some(SMS),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_channel_has_two_templates() {
        for channel in ["email", "linkedin", "sms"] {
            let templates = templates_for(channel).unwrap();
            assert_eq!(templates.len(), 2);
            assert!(templates.iter().all(|t| t.id.starts_with(channel)));
        }
        assert!(templates_for("fax").is_none());
    }
}
