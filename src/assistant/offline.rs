//! Canned offline responses.
//!
//! Used when no authenticated backend exists or a live completion fails.
//! The routing is keyword based and intentionally simple; the answers are
//! a condensed actuarial knowledge base so the dashboard stays useful
//! without credentials.

/// Answer a user message without any live model.
///
/// Never fails and never returns an empty string.
pub fn respond(message: &str) -> String {
    let lower = message.to_lowercase();

    if contains_any(&lower, &["actuary", "actuaries", "actuarial"]) {
        ACTUARY_ANSWER.to_string()
    } else if contains_any(&lower, &["pricing", "price", "premium", "rate"]) {
        PRICING_ANSWER.to_string()
    } else if contains_any(&lower, &["risk", "assessment", "underwriting"]) {
        RISK_ANSWER.to_string()
    } else if contains_any(&lower, &["hello", "hi", "help", "assist"]) {
        GREETING_ANSWER.to_string()
    } else {
        format!(
            "I understand you're asking about: \"{message}\"\n\n{GENERIC_ANSWER}"
        )
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

const ACTUARY_ANSWER: &str = "\
What actuaries do in insurance pricing:

1. Risk assessment and modeling: analyze historical data to predict future
   claims, develop statistical models for mortality and morbidity, and
   quantify uncertainty in insurance products.
2. Premium calculation: set competitive yet profitable rates that cover
   expected claims, expenses, and profit margins, based on risk factors
   such as age, health, and location.
3. Product development: design new products and coverage options, test
   viability through modeling, and ensure regulatory compliance.
4. Financial forecasting: project cash flows and liabilities, calculate
   reserves for future claims, and run stress tests.
5. Data analysis: interpret complex datasets, build predictive claim
   models, and provide data-driven recommendations.

Would you like me to explain any specific aspect of actuarial work in more
detail?";

const PRICING_ANSWER: &str = "\
Insurance pricing methodologies:

1. Risk-based pricing: individual risk assessment, statistical modeling of
   claim likelihood, and segmentation of customers by risk profile.
2. Actuarial models: mortality tables for life products, loss ratios for
   property/casualty, frequency/severity models, and credibility theory
   for combining internal and external data.
3. Key pricing factors: demographics, health status, coverage amount, and
   policy terms such as deductibles and waiting periods.
4. Pricing techniques: experience rating, community rating, manual rating
   for complex risks, and credibility adjustments.
5. Regulatory considerations: rate filing requirements, anti-discrimination
   rules, solvency requirements, and transparency standards.

Would you like me to dive deeper into any specific pricing methodology?";

const RISK_ANSWER: &str = "\
Risk assessment in insurance:

1. Risk identification: moral hazard, adverse selection, systemic risk,
   and operational risk.
2. Risk quantification: probability of claims, severity assessment,
   correlation analysis, and stress testing.
3. Underwriting process: application review, medical and financial
   underwriting, and risk classification.
4. Risk management tools: diversification, reinsurance, reserves, and
   risk controls.
5. Data-driven assessment: predictive modeling, machine-learning risk
   scores, real-time monitoring, and fraud detection.

Would you like me to explain any specific aspect of risk assessment?";

const GREETING_ANSWER: &str = "\
Hello! I'm your AI pricing assistant.

I'm currently running in offline mode, but I can still provide guidance on:

- Actuarial analysis: statistical modeling, mortality and morbidity
  analysis, reserve calculations, regulatory reporting.
- Insurance pricing: risk-based methodologies, premium calculation,
  product development, market positioning.
- Data analysis: statistical techniques, predictive analytics,
  performance measurement.
- Risk management: underwriting guidelines, risk classification,
  portfolio optimization.

How can I help you today?";

const GENERIC_ANSWER: &str = "\
I'm your specialized assistant for insurance pricing and actuarial
analysis, currently running in offline mode. I can help with:

- Actuarial concepts: mortality tables, loss ratios, credibility theory.
- Pricing methodologies: risk-based pricing, experience rating, manual
  rating.
- Risk assessment: underwriting, risk classification, portfolio
  management.
- Regulatory compliance: rate filings, solvency requirements, reporting
  standards.

Ask a specific question and I'll provide detailed guidance.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_routing() {
        assert!(respond("what does an actuary do?").contains("actuaries do in insurance"));
        assert!(respond("explain PREMIUM rates").contains("pricing methodologies"));
        assert!(respond("risk underwriting?").contains("Risk assessment in insurance"));
        assert!(respond("hello there").contains("offline mode"));
    }

    #[test]
    fn unknown_topic_echoes_the_question() {
        let reply = respond("tell me about llamas");
        assert!(reply.contains("tell me about llamas"));
        assert!(reply.contains("offline mode"));
    }

    #[test]
    fn never_empty() {
        assert!(!respond("").is_empty());
    }
}
