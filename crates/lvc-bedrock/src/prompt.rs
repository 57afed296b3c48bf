//! The LVC report prompt.
//!
//! The system prompt carries the persona and the business rules; the user
//! message carries the document data followed by the mandatory template.
//! Both are fixed text apart from the document name and the (truncated)
//! extracted text.

/// Default character budget for the document text embedded in the prompt.
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 70_000;

const SYSTEM_PROMPT: &str = "\
Aja como um Engenheiro Rodoviário Sênior especializado em Levantamento Visual Contínuo (LVC). \
Você analisa o texto extraído de um único relatório de inspeção rodoviária e preenche o \
template obrigatório fornecido, sem inventar dados.

REGRAS DE LÓGICA (obrigatórias):
1. **A Implantar (obras novas):** As seções \"A Implantar\" (meios-fios, sarjetas/valas, placas) \
só podem ser preenchidas se o documento tiver uma tabela ou seção explícita de obras novas / \
implantação. Se essa tabela não existir, os quantitativos dessas seções são **0** e a descrição é \
\"Não identificado\". Avaliações de estado (ex.: \"meio-fio em estado ruim\") NUNCA viram item \
\"A Implantar\".
2. **Restauração:** \"Áreas para Restauração\" é **0** a menos que o documento use explicitamente \
os termos restauração ou reconstrução. Tapa-buraco, remendo ou menções genéricas de desgaste não \
contam como restauração.
3. **Desgaste:** Só preencha \"Desgaste\" se houver a tabela de desgaste; caso não tenha, é **0**.
4. **Desgaste vs Pórticos:** Desgaste (degradação superficial) e Pórticos (estruturas aéreas) são \
assuntos independentes. Nunca use evidência de um para preencher o outro.
5. **OAEs não têm nada a ver com Pórticos.** Pontes e viadutos vão apenas em \"OAEs\".
6. **Intro:** Comece com \"Olá! Como Engenheiro Rodoviário Sênior...\" e comente brevemente sobre a \
identificação da rodovia/trecho.
7. **Formatação:** Use Markdown (**, ###, >) para o site. Mantenha os espaços em branco do template.";

const TEMPLATE: &str = "\
[Introdução cordial e técnica]

Segue o resumo técnico:

### 📍 RESUMO TÉCNICO LVC
🛣️ *Trecho:* {trecho}

- *Extensão:* **[X] km**
- *Revestimento (Pista):* **[Tipo e KMs]**
- *Acostamento:* **[Largura/Tipo]**

> 🏗️ *Pórticos:*
- [Situação dos pórticos]

---
### 1. PISTA DE ROLAMENTO

> *Panelas Abertas (PA)*
- Ocorrências: **[Total]**
- Área Total: **[X] m²**
- Locais Críticos: [Listar]


> *Rebaixamentos Laterais (RL)*
- Ocorrências: **[Total]**
- Área Total: **[X] m²**
- Trechos: [Descrição]


> *Erosões*
- Ocorrências: **[Total]**
- Volume Total: **[X] m³**
- Detalhes: [Descrição]


> *Áreas para Restauração*
- Ocorrências: **[Total]**
- Extensão: **[X] m**
- Obs: [Descrição]


> *Desgaste*
- Ocorrências: **[Total]**
- Área Total: **[X] m²**
- Trechos: [Descrição]

---
### 2. DRENAGEM & OBRAS

> *OAEs (Pontes/Viadutos)*
- Total: **[X]** | Local: [Descrição]


> *Passagens Molhadas*
- Total: **[X]** | Situação: [Descrição]


> *Bueiros*
- Total: **[X]** unidades
- Obs: [Descrição]


> *Meios-fios e Sarjetas (Existentes)*
- Total Geral: **[X] m**
- Situação: Bom (**[X]m**) | Regular (**[X]m**) | Ruim (**[X]m**)

> *Sarjetas (Existentes)*
- Total Geral: **[X] m**
- Situação: Bom (**[X]m**) | Regular (**[X]m**) | Ruim (**[X]m**)

> *Meios-fios (A Implantar)*
- Total a fazer: **[X] m**
- Lado Esquerdo: [Descrição]
- Lado Direito: [Descrição]


> *Sarjetas/Valas (A Implantar)*
- Total a fazer: **[X] m**
- Lado Esquerdo: [Descrição]
- Lado Direito: [Descrição]

---
### 3. SINALIZAÇÃO

> *Horizontal (Pintura)*
- Situação: **[Descrição]**


> *Vertical (Placas Existentes)*
- Total: **[Qtd]**
- Situação: [Descrição]


> *A Implantar (Placas)*
- Regulamentação: **[Qtd]** ([Obs])
- Advertência: **[Qtd]** ([Obs])

---
### 4. SERVIÇOS GERAIS
- *Roço Lateral:* **[X] ha** ([Obs])
- *Conclusão:* [Parecer final técnico]";

/// A ready-to-send prompt.
#[derive(Debug, Clone)]
pub struct ReportPrompt {
    pub system: String,
    pub user: String,
    /// Characters of document text embedded in `user`.
    pub text_chars: usize,
    pub truncated: bool,
}

/// Keep at most `max_chars` characters of `text`, dropping the tail.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Section name for a document: its display name without the `.pdf`
/// extension.
pub fn trecho_name(document_name: &str) -> &str {
    let len = document_name.len();
    if len >= 4
        && document_name.is_char_boundary(len - 4)
        && document_name[len - 4..].eq_ignore_ascii_case(".pdf")
    {
        &document_name[..len - 4]
    } else {
        document_name
    }
}

pub fn system_prompt() -> &'static str {
    SYSTEM_PROMPT
}

/// Assemble the prompt for `document_name` around `text`.
pub fn build_prompt(document_name: &str, text: &str, max_chars: usize) -> ReportPrompt {
    let data = truncate_chars(text, max_chars);
    let truncated = data.len() < text.len();
    let template = TEMPLATE.replace("{trecho}", trecho_name(document_name));

    let mut user = String::with_capacity(data.len() + template.len() + 256);
    user.push_str(&format!("Analise o PDF: {document_name}.\n\n"));
    user.push_str("<dados>\n");
    user.push_str(data);
    if !data.ends_with('\n') {
        user.push('\n');
    }
    user.push_str("</dados>\n\n");
    user.push_str("--- TEMPLATE OBRIGATÓRIO (Mantenha os espaços em branco) ---\n\n");
    user.push_str(&template);

    ReportPrompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
        text_chars: data.chars().count(),
        truncated,
    }
}
