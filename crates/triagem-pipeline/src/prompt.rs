//! LLM prompt engineering for email classification

use triagem_domain::EmailText;

/// Builds the classification prompt for one email
///
/// The output depends only on the email text, so building twice yields
/// byte-identical prompts. The email is embedded verbatim: no escaping is
/// applied, which leaves the prompt open to injection from the email body.
pub struct PromptBuilder<'a> {
    text: &'a EmailText,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(text: &'a EmailText) -> Self {
        Self { text }
    }

    /// Build the complete classification prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(
            CLASSIFICATION_INSTRUCTIONS.len() + OUTPUT_FORMAT_REMINDER.len() + self.text.as_str().len() + 32,
        );

        // 1. Task and categories
        prompt.push_str(CLASSIFICATION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. The email to analyze
        prompt.push_str("Texto do email:\n");
        prompt.push_str(EMAIL_DELIMITER);
        prompt.push('\n');
        prompt.push_str(self.text.as_str());
        prompt.push('\n');
        prompt.push_str(EMAIL_DELIMITER);
        prompt.push_str("\n\n");

        // 3. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

/// Line that opens and closes the embedded email
pub const EMAIL_DELIMITER: &str = "---";

/// Role given to the backend when system instructions are enabled
pub const SYSTEM_INSTRUCTION: &str = "Você é um assistente de triagem de emails de uma empresa do setor financeiro. \
Sua função é classificar cada email recebido como Produtivo ou Improdutivo e sugerir uma resposta adequada, \
respondendo sempre com um objeto JSON.";

/// JSON schema of the expected answer, for providers with a structured output mode
pub const RESPONSE_SCHEMA: &str = r#"{
  "type": "OBJECT",
  "properties": {
    "classificacao": {
      "type": "STRING",
      "format": "enum",
      "enum": ["Produtivo", "Improdutivo"]
    },
    "sugestao_resposta": {
      "type": "STRING"
    }
  },
  "required": ["classificacao", "sugestao_resposta"],
  "propertyOrdering": ["classificacao", "sugestao_resposta"]
}"#;

const CLASSIFICATION_INSTRUCTIONS: &str = r#"Analise o seguinte texto de um email e retorne um objeto JSON com duas chaves: "classificacao" e "sugestao_resposta".

As categorias de classificação são: "Produtivo" ou "Improdutivo".

- "Produtivo": Emails que requerem uma ação, como solicitações, dúvidas técnicas ou atualizações de status. A resposta deve ser profissional e direcionada à ação.
- "Improdutivo": Emails que não requerem ação imediata, como spams, felicitações ou agradecimentos. A resposta deve ser curta e cordial, ou sugerir o arquivamento."#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Retorne apenas o objeto JSON, sem nenhum texto adicional ou formatação de código.
Exemplo de retorno: {"classificacao": "Produtivo", "sugestao_resposta": "Prezado(a), recebemos sua solicitação e nossa equipe já está analisando. Retornaremos em breve."}"#;
