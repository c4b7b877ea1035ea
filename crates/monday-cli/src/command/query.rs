use anyhow::bail;
use clap::Args;
use monday_core::{GraphqlRequest, MondayClient};
use serde_json::{Map, Value};

use super::{parse_json, print_json};

#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// GraphQL document.
    pub query: String,
    /// JSON object of variables.
    #[arg(long, value_parser = parse_json)]
    pub variables: Option<Value>,
}

impl QueryArgs {
    pub async fn run(self, client: &MondayClient) -> anyhow::Result<()> {
        let variables = match self.variables {
            None => Map::new(),
            Some(Value::Object(variables)) => variables,
            Some(_) => bail!("--variables must be a JSON object"),
        };

        let request = variables
            .into_iter()
            .fold(GraphqlRequest::new(self.query), |request, (name, value)| {
                request.with_variable(name, value)
            });

        let classification = client.execute_raw(&request).await?;
        print_json(&classification)
    }
}
