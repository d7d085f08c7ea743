use sitechat_domain::SearchResult;
use sitechat_providers::llm::ChatMessage;

const SYSTEM_PROMPT: &str = "\
You are a helpful assistant for a company website. Answer using the website content provided by \
the user message.

Guidelines:
- Answer questions based only on the provided content.
- If the content does not cover the question, say so politely.
- Be helpful, professional and concise.
- Include specific details when available.
- For services, pricing or contact questions, refer to the website content.";

/// Builds the chat messages for one question, with each passage preceded by its source line.
pub fn build_messages(query: &str, results: &[SearchResult]) -> Vec<ChatMessage> {
	let mut context = String::new();

	for (i, result) in results.iter().enumerate() {
		let source = &result.passage.source;

		context.push_str(&format!(
			"\n--- Context {} ---\nSource: {} ({})\n{}\n",
			i + 1,
			source.title,
			source.url,
			result.passage.text
		));
	}

	let user = format!(
		"WEBSITE CONTENT:\n{context}\nUSER QUESTION: {query}\n\n\
		ANSWER (based on the website content above):"
	);

	vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user)]
}
