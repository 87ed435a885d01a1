use super::definition::QueryDefinition;

/// `(label, description, sql)` in display order.
///
/// Postgres folds unquoted identifiers to lower case, so columns that chart
/// rules look up by mixed-case name are aliased with quotes.
const FOOD_WASTAGE_QUERIES: &[(&str, &str, &str)] = &[
    (
        "Total Rows",
        "Number of claim records",
        "SELECT COUNT(*) AS total_rows FROM food_wastage;",
    ),
    (
        "Sample Data (10 rows)",
        "First ten claim records",
        "SELECT * FROM food_wastage LIMIT 10;",
    ),
    (
        "KPI Summary",
        "Headline figures from the KPI view",
        "SELECT * FROM v_fw_kpis;",
    ),
    (
        "Providers by City",
        "Distinct providers per city",
        "SELECT * FROM v_fw_providers_by_city;",
    ),
    (
        "Near Expiry (Next 3 Days)",
        "Listings expiring within three days",
        "SELECT * FROM v_fw_near_expiry;",
    ),
    (
        "Completed Claims by Day",
        "Completed claims per calendar day",
        "SELECT * FROM v_fw_completed_by_day;",
    ),
    (
        "Top 10 Providers by Quantity",
        "Providers ranked by total quantity donated",
        r#"SELECT Provider_ID, Name AS "Name", City AS "City", SUM(Quantity) AS total_qty
FROM food_wastage
GROUP BY Provider_ID, Name, City
ORDER BY total_qty DESC
LIMIT 10;"#,
    ),
    (
        "Food Type Ranking",
        "Quantity and claim count per food type",
        r#"SELECT Food_Type AS "Food_Type", SUM(Quantity) AS total_qty, COUNT(*) AS claims
FROM food_wastage
GROUP BY Food_Type
ORDER BY total_qty DESC;"#,
    ),
    (
        "Receivers by City",
        "Claims per receiver city",
        r#"SELECT City_receiver AS "City_receiver", COUNT(*) AS claim_count
FROM food_wastage
GROUP BY City_receiver
ORDER BY claim_count DESC;"#,
    ),
    (
        "Avg Days to Expiry at Claim",
        "Mean days left before expiry when food is claimed",
        r#"SELECT AVG(Expiry_Date - DATE(Timestamp)) AS avg_days_to_expiry
FROM food_wastage
WHERE Expiry_Date IS NOT NULL AND Timestamp IS NOT NULL;"#,
    ),
    (
        "Cancellation Rate %",
        "Share of claims cancelled",
        r#"SELECT ROUND(100.0 * SUM(CASE WHEN Status='Cancelled' THEN 1 ELSE 0 END) / COUNT(*), 2)
AS cancellation_rate_pct
FROM food_wastage;"#,
    ),
];

pub(crate) fn food_wastage_queries() -> Vec<QueryDefinition> {
    FOOD_WASTAGE_QUERIES
        .iter()
        .map(|(label, description, sql)| {
            QueryDefinition::new(*label, *sql).with_description(*description)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sql_for(label: &str) -> &'static str {
        FOOD_WASTAGE_QUERIES
            .iter()
            .find(|(l, _, _)| *l == label)
            .map(|(_, _, sql)| *sql)
            .unwrap()
    }

    #[test]
    fn test_mixed_case_chart_columns_are_quoted() {
        let expected = [
            ("Top 10 Providers by Quantity", &["Name", "City"][..]),
            ("Food Type Ranking", &["Food_Type"][..]),
            ("Receivers by City", &["City_receiver"][..]),
        ];
        for (label, columns) in expected {
            let sql = sql_for(label);
            for column in columns {
                let alias = format!("AS \"{}\"", column);
                assert!(sql.contains(&alias), "{} lacks {}", label, alias);
            }
        }
    }

    #[test]
    fn test_quoted_aliases_still_validate() {
        let queries = food_wastage_queries();
        assert_eq!(queries.len(), 11);
        for query in &queries {
            crate::catalog::QueryValidator::validate(query).unwrap();
        }
    }
}
