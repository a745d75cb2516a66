use anyhow::{Context, Result, anyhow, bail};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::LlmSection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Provider {
    #[value(name = "openai")]
    OpenAi,
    Gemini,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
        }
    }

    /// Provider named in config.toml.
    pub fn from_config(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            other => bail!("unknown llm.provider '{other}' (openai|gemini)"),
        }
    }

    fn key_var(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
        }
    }
}

/// What came back from the model.
#[derive(Debug, Clone, PartialEq)]
pub enum LlmReply {
    /// Message text from a provider API, still to be cut down to JSON.
    Text(String),
    /// Body returned by a configured proxy endpoint, already JSON.
    Json(Value),
}

pub async fn complete(cfg: &LlmSection, provider: Provider, prompt: &str) -> Result<LlmReply> {
    let client = reqwest::Client::new();

    if let Some(endpoint) = cfg.endpoint.as_deref().filter(|e| !e.trim().is_empty()) {
        return endpoint_complete(&client, endpoint, provider, prompt).await;
    }

    let key = std::env::var(provider.key_var()).map_err(|_| {
        anyhow!(
            "missing {}; export it (or set llm.endpoint in config.toml) to use --llm",
            provider.key_var()
        )
    })?;

    let text = match provider {
        Provider::OpenAi => openai_complete(&client, cfg, &key, prompt).await?,
        Provider::Gemini => gemini_complete(&client, cfg, &key, prompt).await?,
    };
    Ok(LlmReply::Text(text))
}

async fn endpoint_complete(
    client: &reqwest::Client,
    endpoint: &str,
    provider: Provider,
    prompt: &str,
) -> Result<LlmReply> {
    #[derive(Serialize)]
    struct Req<'a> {
        provider: &'a str,
        prompt: &'a str,
    }

    tracing::info!(endpoint, provider = provider.as_str(), "calling LLM endpoint");
    let resp = client
        .post(endpoint)
        .json(&Req {
            provider: provider.as_str(),
            prompt,
        })
        .send()
        .await
        .context("LLM endpoint request")?;

    let status = resp.status();
    if !status.is_success() {
        bail!("LLM endpoint failed ({status})");
    }
    let json: Value = resp.json().await.context("parse LLM endpoint response")?;
    Ok(LlmReply::Json(json))
}

async fn openai_complete(
    client: &reqwest::Client,
    cfg: &LlmSection,
    key: &str,
    prompt: &str,
) -> Result<String> {
    #[derive(Serialize)]
    struct Msg<'a> {
        role: &'a str,
        content: &'a str,
    }

    #[derive(Serialize)]
    struct Req<'a> {
        model: &'a str,
        temperature: f32,
        messages: Vec<Msg<'a>>,
    }

    #[derive(Deserialize)]
    struct Resp {
        choices: Vec<Choice>,
    }

    #[derive(Deserialize)]
    struct Choice {
        message: MsgOut,
    }

    #[derive(Deserialize)]
    struct MsgOut {
        content: Option<String>,
    }

    let body = Req {
        model: &cfg.openai_model,
        temperature: cfg.temperature,
        messages: vec![
            Msg {
                role: "system",
                content: "You return ONLY valid JSON.",
            },
            Msg {
                role: "user",
                content: prompt,
            },
        ],
    };

    tracing::info!(model = %cfg.openai_model, "calling OpenAI");
    let resp = client
        .post("https://api.openai.com/v1/chat/completions")
        .header(AUTHORIZATION, format!("Bearer {key}"))
        .json(&body)
        .send()
        .await
        .context("openai request")?;

    let status = resp.status();
    if !status.is_success() {
        let txt = resp.text().await.unwrap_or_default();
        bail!("OpenAI request failed ({status}): {txt}");
    }

    let out: Resp = resp.json().await.context("parse openai response")?;
    Ok(out
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default())
}

async fn gemini_complete(
    client: &reqwest::Client,
    cfg: &LlmSection,
    key: &str,
    prompt: &str,
) -> Result<String> {
    #[derive(Serialize)]
    struct Part<'a> {
        text: &'a str,
    }

    #[derive(Serialize)]
    struct Content<'a> {
        role: &'a str,
        parts: Vec<Part<'a>>,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct GenerationConfig {
        temperature: f32,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Req<'a> {
        contents: Vec<Content<'a>>,
        generation_config: GenerationConfig,
    }

    #[derive(Deserialize)]
    struct Resp {
        #[serde(default)]
        candidates: Vec<Candidate>,
    }

    #[derive(Deserialize)]
    struct Candidate {
        content: Option<CandidateContent>,
    }

    #[derive(Deserialize)]
    struct CandidateContent {
        #[serde(default)]
        parts: Vec<PartOut>,
    }

    #[derive(Deserialize)]
    struct PartOut {
        text: Option<String>,
    }

    let body = Req {
        contents: vec![Content {
            role: "user",
            parts: vec![Part { text: prompt }],
        }],
        generation_config: GenerationConfig {
            temperature: cfg.temperature,
        },
    };

    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
        cfg.gemini_model
    );

    tracing::info!(model = %cfg.gemini_model, "calling Gemini");
    let resp = client
        .post(&url)
        .query(&[("key", key)])
        .json(&body)
        .send()
        .await
        .context("gemini request")?;

    let status = resp.status();
    if !status.is_success() {
        let txt = resp.text().await.unwrap_or_default();
        bail!("Gemini request failed ({status}): {txt}");
    }

    let out: Resp = resp.json().await.context("parse gemini response")?;
    Ok(out
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_names() {
        assert_eq!(Provider::from_config(" OpenAI ").unwrap(), Provider::OpenAi);
        assert_eq!(Provider::from_config("gemini").unwrap(), Provider::Gemini);
        assert!(Provider::from_config("anthropic").is_err());
        assert_eq!(Provider::Gemini.as_str(), "gemini");
    }
}
