use leadmcp_llm::GatewayError;

use crate::collaborators::ClassifierGateway;
use crate::prompts::SUMMARIZE_PROMPT;

/// Asks the gateway for a short summary of `text` and returns it verbatim.
///
/// # Errors
///
/// Propagates the gateway's [`GatewayError`].
pub async fn summarize(gateway: &dyn ClassifierGateway, text: &str) -> Result<String, GatewayError> {
    gateway.ask(SUMMARIZE_PROMPT, text).await
}
