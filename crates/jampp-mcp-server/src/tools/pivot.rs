//! Builder for `pivot` queries, which back all of the campaign tools

use jampp_reporting::QueryRequest;

pub(super) struct Pivot<'a> {
    /// The operation name
    pub(super) operation: &'a str,

    /// The alias for the pivot field, which is where results are read from
    pub(super) alias: &'a str,

    pub(super) fields: &'a [&'a str],

    pub(super) group_by: Option<&'a str>,
}

impl Pivot<'_> {
    /// Build the request for a date range, optionally narrowed to one campaign
    pub(super) fn request(&self, from: String, to: String, campaign_id: Option<i64>) -> QueryRequest {
        let mut variables = vec!["$from: DateTime!", "$to: DateTime!"];
        let mut arguments = vec!["from: $from".to_string(), "to: $to".to_string()];
        if campaign_id.is_some() {
            variables.push("$campaignId: Int!");
            arguments.push("filter: { campaignId: { equals: $campaignId } }".to_string());
        }
        if let Some(group_by) = self.group_by {
            arguments.push(format!("groupBy: [{group_by}]"));
        }

        let fields = self
            .fields
            .iter()
            .map(|field| format!("      {field}"))
            .collect::<Vec<_>>()
            .join("\n");

        let query = format!(
            "query {operation}({variables}) {{\n  {alias}: pivot({arguments}) {{\n    results {{\n{fields}\n    }}\n  }}\n}}",
            operation = self.operation,
            variables = variables.join(", "),
            alias = self.alias,
            arguments = arguments.join(", "),
        );

        let request = QueryRequest::new(query)
            .variable("from", from)
            .variable("to", to);
        match campaign_id {
            Some(campaign_id) => request.variable("campaignId", campaign_id),
            None => request,
        }
    }

    /// The path to the results inside the response data
    pub(super) fn results_path(&self) -> [&str; 2] {
        [self.alias, "results"]
    }
}
