//! Fixed prompts offered to users.
//!
//! The product ships in Brazilian Portuguese; these strings are locale-fixed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Questions suggested right after an upload, cleared after the first exchange.
pub const SUGGESTED_QUESTIONS: [&str; 4] = [
    "Qual é o objetivo principal deste documento?",
    "Faça um resumo dos pontos mais importantes",
    "Quais são as principais informações técnicas?",
    "Explique o conteúdo de forma didática",
];

/// Local-only reply shown when the vendor fails to answer.
pub const APOLOGY_MESSAGE: &str =
    "Desculpe, ocorreu um erro ao processar sua mensagem. Tente novamente.";

const EXPLAIN_PROMPT: &str =
    "Por favor, explique o conteúdo principal deste documento de forma detalhada e didática.";

const SUMMARIZE_PROMPT: &str =
    "Faça um resumo executivo dos pontos mais importantes deste documento.";

const REWRITE_PROMPT: &str =
    "Reescreva o conteúdo principal deste documento de forma mais concisa e clara.";

const EXTRACT_RECORD_PROMPT: &str = "\
Extraia exatamente os seguintes dados, caso existam, da ficha funcional do profissional da saúde apresentada neste documento PDF:

- Nome completo
- Data de nascimento
- Portaria de nomeação
- Data de ingresso/data de posse
- Especialidade
- Períodos de férias
- Licenças/licenças prêmio/afastamentos
- Progressões
- Número de matrícula
- Averbações
- PDV (Plano de Demissão Voluntária)
- Regime de ingresso (estatutário ou celetista)
- Dados de cessão (se foi cedido para outro órgão, quais órgãos, datas e documentos relacionados)
- Órgão de origem
- Dados de exoneração (motivo, datas e documentos)
- Quaisquer outros dados funcionais presentes na ficha

Responda com uma linha por campo no formato \"Campo: valor\". Quando um dado não constar do documento, escreva \"Não especificado no documento.\"";

/// Returns the suggested questions as owned strings.
pub fn suggested_questions() -> Vec<String> {
    SUGGESTED_QUESTIONS.iter().map(|q| q.to_string()).collect()
}

/// Greeting shown above an empty transcript, chosen from the document name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Welcome {
    pub title: &'static str,
    pub description: &'static str,
    pub topics: [&'static str; 3],
    pub question: &'static str,
}

const EVENTS_WELCOME: Welcome = Welcome {
    title: "Sistema para a Conexão Local",
    description: "Uma plataforma que ajuda a divulgar eventos culturais, educativos e sociais na cidade. Tudo para que moradores e organizadores possam se conectar melhor, curtindo, comentando e se inscrevendo nos eventos.",
    topics: [
        "Criar o banco de dados com tudo que envolve usuários, organizadores, eventos e as interações",
        "Fazer a página principal mostrando eventos, perfil dos organizadores e login",
        "Criar funcionalidades para o usuário logado acompanhar suas inscrições e interações",
    ],
    question: "Vamos trocar uma ideia sobre essa plataforma?",
};

const PROJECT_WELCOME: Welcome = Welcome {
    title: "Análise do Projeto",
    description: "Este documento contém informações importantes sobre o projeto que vamos desenvolver juntos.",
    topics: [
        "Analisar os requisitos do sistema",
        "Definir a arquitetura da aplicação",
        "Implementar as funcionalidades principais",
    ],
    question: "Que tal começarmos a discutir os detalhes do projeto?",
};

const MANUAL_WELCOME: Welcome = Welcome {
    title: "Manual/Guia de Referência",
    description: "Este documento serve como guia para entender os processos e procedimentos descritos.",
    topics: [
        "Revisar os procedimentos principais",
        "Esclarecer dúvidas sobre os processos",
        "Implementar as melhores práticas",
    ],
    question: "Posso ajudar você a entender melhor este manual?",
};

const DEFAULT_WELCOME: Welcome = Welcome {
    title: "Análise do Documento",
    description: "Vamos analisar este documento juntos para extrair as informações mais importantes e discutir seu conteúdo.",
    topics: [
        "Revisar o conteúdo principal",
        "Identificar pontos importantes",
        "Esclarecer dúvidas sobre o documento",
    ],
    question: "Sobre o que você gostaria de conversar primeiro?",
};

/// Picks the welcome for a document by keywords in its name (case-insensitive).
///
/// Checked in order: events, projects, manuals; anything else gets the default.
pub fn welcome_for(document_name: &str) -> Welcome {
    let name = document_name.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| name.contains(w));

    if mentions(&["conexão", "evento", "cultural"]) {
        EVENTS_WELCOME
    } else if mentions(&["projeto", "sistema"]) {
        PROJECT_WELCOME
    } else if mentions(&["manual", "guia"]) {
        MANUAL_WELCOME
    } else {
        DEFAULT_WELCOME
    }
}

/// One-click actions that send a canned prompt as a normal exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuickAction {
    Explain,
    Summarize,
    Rewrite,
    /// Structured extraction of an employee record ("ficha funcional").
    ExtractRecord,
}

impl QuickAction {
    pub const ALL: [QuickAction; 4] = [
        QuickAction::Explain,
        QuickAction::Summarize,
        QuickAction::Rewrite,
        QuickAction::ExtractRecord,
    ];

    /// The prompt sent to the vendor for this action.
    pub fn prompt(&self) -> &'static str {
        match self {
            QuickAction::Explain => EXPLAIN_PROMPT,
            QuickAction::Summarize => SUMMARIZE_PROMPT,
            QuickAction::Rewrite => REWRITE_PROMPT,
            QuickAction::ExtractRecord => EXTRACT_RECORD_PROMPT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuickAction::Explain => "explain",
            QuickAction::Summarize => "summarize",
            QuickAction::Rewrite => "rewrite",
            QuickAction::ExtractRecord => "extract-record",
        }
    }
}

impl fmt::Display for QuickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuickAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuickAction::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("action", format!("unknown quick action '{}'", s))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_suggested_questions() {
        assert_eq!(suggested_questions().len(), 4);
        assert!(suggested_questions().iter().all(|q| !q.trim().is_empty()));
    }

    #[test]
    fn welcome_follows_document_keywords() {
        assert_eq!(welcome_for("Agenda de EVENTOS.pdf").title, "Sistema para a Conexão Local");
        assert_eq!(welcome_for("CONEXÃO local.pdf").title, "Sistema para a Conexão Local");
        assert_eq!(welcome_for("sistema_rh.pdf").title, "Análise do Projeto");
        assert_eq!(welcome_for("Guia rápido.pdf").title, "Manual/Guia de Referência");
        assert_eq!(welcome_for("report.pdf").title, "Análise do Documento");
    }

    #[test]
    fn event_keywords_win_over_project_keywords() {
        assert_eq!(welcome_for("projeto evento.pdf"), EVENTS_WELCOME);
    }

    #[test]
    fn every_action_round_trips_through_its_name() {
        for action in QuickAction::ALL {
            assert_eq!(action.as_str().parse::<QuickAction>().unwrap(), action);
        }
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!("translate".parse::<QuickAction>().is_err());
    }

    #[test]
    fn every_prompt_is_non_blank() {
        for action in QuickAction::ALL {
            assert!(!action.prompt().trim().is_empty());
        }
    }

    #[test]
    fn serde_name_matches_path_name() {
        let json = serde_json::to_string(&QuickAction::ExtractRecord).unwrap();
        assert_eq!(json, "\"extract-record\"");
    }
}
