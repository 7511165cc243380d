//! Prompt construction for dataset questions.

use crate::models::SalaryRecord;

/// Build the completion prompt for a free-text question.
///
/// The entire dataset is serialized wholesale as JSON and embedded in
/// the prompt together with the question; the model is expected to
/// answer from the data alone. The question itself is passed through
/// unvalidated.
pub fn build_prompt(question: &str, records: &[SalaryRecord]) -> String {
    let dataset_json = serde_json::to_string(records).unwrap_or_else(|_| "[]".to_string());

    format!(
        "You are a data analyst for a dashboard of technology-job salary records.\n\
         Answer the user's question using ONLY the dataset below. Keep the answer\n\
         short and concrete; cite years and figures from the data where relevant.\n\
         If the question cannot be answered from the dataset, say so.\n\
         \n\
         Question:\n\
         {question}\n\
         \n\
         Dataset (JSON, one object per salary record):\n\
         {dataset_json}\n\
         \n\
         Answer:"
    )
}
