//! SQL statement builders for the analysis pipeline.
//!
//! The statements target Databricks SQL: `READ_FILES` over a volume,
//! `ai_parse_document` for OCR/structure, `ai_query` against a serving
//! endpoint, and JSON projection into typed columns.

use crate::config::AppConfig;

/// JSON fields the model is expected to return, in table column order.
pub const FEATURE_FIELDS: &[&str] = &[
    "issuing_company",
    "minimum_premium",
    "withdrawal_options",
    "interest_crediting",
    "surrender_charge_schedule",
    "surrender_charge_percentage",
    "death_benefit",
    "available_riders",
    "issue_ages",
    "guarantee_period",
    "guaranteed_minimum_interest_rate",
];

/// Fields holding JSON arrays rather than scalars.
const ARRAY_FIELDS: &[&str] = &["issuing_company", "withdrawal_options", "available_riders"];

/// Stage 1: parse every brochure in the volume into one row of text.
pub fn parse_statement(config: &AppConfig) -> String {
    let table = config.qualified_table(&config.tables.parsed);
    let volume = &config.databricks.volume_path;
    format!(
        r"CREATE OR REPLACE TABLE {table} AS
WITH all_files AS (
  SELECT path, content
  FROM READ_FILES('{volume}', format => 'binaryFile')
  ORDER BY path ASC
),
repartitioned_files AS (
  SELECT * FROM all_files
  DISTRIBUTE BY crc32(path) % 4
),
parsed_documents AS (
  SELECT path, ai_parse_document(content) AS parsed
  FROM repartitioned_files
  WHERE array_contains(array('.pdf', '.jpg', '.jpeg', '.png'), lower(regexp_extract(path, r'(\.[^.]+)$', 1)))
),
sorted_contents AS (
  SELECT path, element:content AS content
  FROM (
    SELECT path,
      posexplode(
        CASE
          WHEN try_cast(parsed:metadata:version AS STRING) = '1.0'
          THEN try_cast(parsed:document:pages AS ARRAY<VARIANT>)
          ELSE try_cast(parsed:document:elements AS ARRAY<VARIANT>)
        END
      ) AS (idx, element)
    FROM parsed_documents
    WHERE try_cast(parsed:error_status AS STRING) IS NULL
  )
  ORDER BY idx
),
concatenated AS (
  SELECT path, concat_ws('\n\n', collect_list(content)) AS full_content
  FROM sorted_contents
  WHERE content IS NOT NULL
  GROUP BY path
)
SELECT path, full_content AS text, current_timestamp() AS parsed_timestamp
FROM concatenated"
    )
}

/// Row count of a table.
pub fn count_statement(qualified_table: &str) -> String {
    format!("SELECT COUNT(*) AS count FROM {qualified_table}")
}

/// Throwaway query proving the serving endpoint exists and answers.
pub fn endpoint_preflight_statement(endpoint: &str) -> String {
    format!(
        "SELECT ai_query('{endpoint}', 'Test insurance product with minimum premium $1000', failOnError => false) AS test_response"
    )
}

/// Stage 2: run every parsed brochure through the serving endpoint.
pub fn responses_statement(config: &AppConfig) -> String {
    let table = config.qualified_table(&config.tables.endpoint_response);
    let parsed = config.qualified_table(&config.tables.parsed);
    let endpoint = &config.databricks.ai_endpoint;
    format!(
        r"CREATE OR REPLACE TABLE {table}
TBLPROPERTIES ('delta.feature.variantType-preview' = 'supported')
AS
WITH query_results AS (
  SELECT
    text AS input,
    ai_query('{endpoint}', text, failOnError => false) AS response,
    current_timestamp() AS timestamp
  FROM {parsed}
)
SELECT
  input,
  response.result AS response,
  response.errorMessage AS error,
  timestamp
FROM query_results"
    )
}

/// Stage 3: project the JSON responses into typed feature columns.
pub fn features_statement(config: &AppConfig) -> String {
    let table = config.qualified_table(&config.tables.pricing_features);
    let responses = config.qualified_table(&config.tables.endpoint_response);

    let mut projections = String::new();
    for field in FEATURE_FIELDS {
        if ARRAY_FIELDS.contains(field) {
            projections.push_str(&format!(
                "  from_json(get_json_object(cast(response AS STRING), '$.{field}'), 'array<string>') AS {field},\n"
            ));
        } else {
            projections.push_str(&format!(
                "  get_json_object(cast(response AS STRING), '$.{field}') AS {field},\n"
            ));
        }
    }

    format!(
        r"CREATE OR REPLACE TABLE {table} AS
SELECT
  input,
  error,
{projections}  response AS features
FROM {responses}
WHERE error IS NULL"
    )
}

/// Most recently extracted feature row, one row of display columns.
pub fn latest_features_statement(config: &AppConfig) -> String {
    let table = config.qualified_table(&config.tables.pricing_features);
    let columns = FEATURE_FIELDS.join(",\n  ");
    format!(
        r"SELECT
  {columns}
FROM {table}
ORDER BY input DESC
LIMIT 1"
    )
}
