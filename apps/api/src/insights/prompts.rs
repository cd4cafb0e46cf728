// Insight prompt template. The industry key is the only interpolated value.

pub const INSIGHT_PROMPT_TEMPLATE: &str = r#"Analyze the current state of the {industry} industry and provide insights in ONLY the following JSON format without any additional notes or explanations:
{
  "salaryRanges": [
    { "role": "string", "min": number, "max": number, "median": number, "location": "string" }
  ],
  "growthRate": number,
  "demandLevel": "High" | "Medium" | "Low",
  "topSkills": ["skill1", "skill2"],
  "marketOutlook": "Positive" | "Neutral" | "Negative",
  "keyTrends": ["trend1", "trend2"],
  "recommendedSkills": ["skill1", "skill2"]
}

RULES:
1. Return ONLY the JSON object. No additional text, notes, or markdown formatting.
2. Include exactly 5 common roles in salaryRanges, with min <= median <= max for each.
3. growthRate is a yearly percentage between -100 and 1000.
4. topSkills, keyTrends and recommendedSkills contain exactly 5 entries each.
5. demandLevel and marketOutlook use exactly one of the listed values, with the same capitalization."#;

pub fn build_insight_prompt(industry: &str) -> String {
    INSIGHT_PROMPT_TEMPLATE.replace("{industry}", industry)
}
