use std::collections::HashMap;
use std::time::Duration;

use log::{error, info, warn};
use serde::{Deserialize, Serialize};

/// 默认的Cohere模型
pub const DEFAULT_MODEL: &str = "command-r7b-12-2024";

const COHERE_CHAT_URL: &str = "https://api.cohere.ai/v1/chat";
const API_KEY_ENV: &str = "RSMARTSUB_COHERE_KEY";

/// 打分后的子域名记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredSubdomain {
    pub subdomain: String,
    pub score: u8,
    pub reason: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    message: &'a str,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    text: String,
}

/// 基于AI的子域名渗透价值打分器
///
/// 测试模式下使用内置的确定性启发式规则，不发起任何网络请求。任何
/// 降级路径都保证每个输入子域名恰好出现一次（得分为0并附带原因）。
pub struct AiFilter {
    client: reqwest::Client,
    api_key: String,
    model: String,
    temperature: f32,
    test_mode: bool,
}

impl AiFilter {
    pub fn new(
        api_key: Option<String>,
        model: Option<String>,
        test_mode: bool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let api_key = api_key
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .unwrap_or_default();

        if !test_mode && api_key.is_empty() {
            return Err(format!("未配置Cohere API密钥，请设置环境变量 {}", API_KEY_ENV).into());
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        let model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        info!("使用Cohere模型: {}", model);

        Ok(AiFilter {
            client,
            api_key,
            model,
            temperature: 0.3,
            test_mode,
        })
    }

    /// 对子域名列表打分，返回按得分降序排列的记录
    pub async fn score_subdomains(&self, subdomains: &[String]) -> Vec<ScoredSubdomain> {
        if subdomains.is_empty() {
            return Vec::new();
        }

        if self.test_mode {
            warn!("测试模式，使用内置启发式规则打分");
            return Self::mock_results(subdomains);
        }

        let prompt = Self::build_prompt(subdomains);
        match self.chat(&prompt).await {
            Ok(text) => Self::parse_response(subdomains, &text),
            Err(e) => {
                error!("AI打分失败: {}", e);
                Self::degraded(subdomains, &format!("Error during scoring: {}", e))
            }
        }
    }

    /// 内置启发式打分，按子域名关键词给出确定性结果
    fn mock_results(subdomains: &[String]) -> Vec<ScoredSubdomain> {
        let mut scored: Vec<ScoredSubdomain> = subdomains
            .iter()
            .map(|subdomain| {
                let name = subdomain.to_lowercase();

                let (score, reason) = if ["admin", "dashboard", "manage", "control"]
                    .iter()
                    .any(|k| name.contains(k))
                {
                    (9, "Administrative interface with potential access to sensitive controls")
                } else if ["db", "database", "sql", "mongo"].iter().any(|k| name.contains(k)) {
                    (9, "Database-related subdomain with high data sensitivity")
                } else if ["api", "service", "rest", "graphql"].iter().any(|k| name.contains(k)) {
                    (8, "API endpoint that may contain security vulnerabilities")
                } else if ["vpn", "remote", "connect"].iter().any(|k| name.contains(k)) {
                    (8, "Network access point that could provide entry to internal systems")
                } else if ["dev", "staging", "test", "uat"].iter().any(|k| name.contains(k)) {
                    (7, "Development/testing environment that may have less security")
                } else if ["auth", "login", "account"].iter().any(|k| name.contains(k)) {
                    (7, "Authentication-related endpoint with potential security implications")
                } else if ["storage", "s3", "file", "cdn"].iter().any(|k| name.contains(k)) {
                    (6, "Storage service that may contain sensitive files or data")
                } else {
                    (5, "Standard subdomain with moderate security relevance")
                };

                ScoredSubdomain {
                    subdomain: subdomain.clone(),
                    score,
                    reason: reason.to_string(),
                }
            })
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored
    }

    fn build_prompt(subdomains: &[String]) -> String {
        let subdomain_list = subdomains
            .iter()
            .map(|s| format!("- {}", s))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"You are a security professional evaluating subdomains for penetration testing.
Rank the following subdomains by their potential security relevance from 1-10:

{}

For each subdomain, provide:
1. A score from 1-10 (10 being highest priority for pentesting)
2. A brief reason for the score

Respond in valid JSON format like this:
[
  {{
    "subdomain": "subdomain1.example.com",
    "score": 8,
    "reason": "Administrative interface with potential access to sensitive controls"
  }},
  ...
]
"#,
            subdomain_list
        )
    }

    async fn chat(&self, prompt: &str) -> Result<String, Box<dyn std::error::Error>> {
        let request = ChatRequest {
            model: &self.model,
            message: prompt,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(COHERE_CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        Ok(response.text)
    }

    /// 从模型回复中提取JSON数组并对齐到输入列表
    ///
    /// 模型可能漏掉或多出条目，这里以输入列表为准：缺失的条目补0分
    /// 记录，多余的条目丢弃，保证每个输入恰好出现一次。
    fn parse_response(subdomains: &[String], text: &str) -> Vec<ScoredSubdomain> {
        let start = text.find('[');
        let end = text.rfind(']');

        let parsed: Vec<ScoredSubdomain> = match (start, end) {
            (Some(start), Some(end)) if end > start => {
                match serde_json::from_str(&text[start..=end]) {
                    Ok(parsed) => parsed,
                    Err(e) => {
                        warn!("AI回复JSON解析失败: {}", e);
                        return Self::degraded(subdomains, "Could not parse AI response");
                    }
                }
            }
            _ => {
                warn!("AI回复中未找到JSON数组");
                return Self::degraded(subdomains, "Could not parse AI response");
            }
        };

        let mut by_name: HashMap<String, ScoredSubdomain> = parsed
            .into_iter()
            .map(|s| (s.subdomain.clone(), s))
            .collect();

        let mut scored: Vec<ScoredSubdomain> = subdomains
            .iter()
            .map(|name| {
                by_name.remove(name).unwrap_or_else(|| ScoredSubdomain {
                    subdomain: name.clone(),
                    score: 0,
                    reason: "Missing from AI response".to_string(),
                })
            })
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored
    }

    fn degraded(subdomains: &[String], reason: &str) -> Vec<ScoredSubdomain> {
        subdomains
            .iter()
            .map(|s| ScoredSubdomain {
                subdomain: s.clone(),
                score: 0,
                reason: reason.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_mock_results_deterministic() {
        let subdomains = names(&["admin.example.com", "www.example.com", "api.example.com"]);
        let first = AiFilter::mock_results(&subdomains);
        let second = AiFilter::mock_results(&subdomains);

        assert_eq!(first.len(), 3);
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.subdomain, b.subdomain);
            assert_eq!(a.score, b.score);
        }

        // 降序排列，admin应排在最前
        assert_eq!(first[0].subdomain, "admin.example.com");
        assert_eq!(first[0].score, 9);
    }

    #[test]
    fn test_mock_results_cover_every_input_once() {
        let subdomains = names(&["a.example.com", "b.example.com", "c.example.com"]);
        let scored = AiFilter::mock_results(&subdomains);

        assert_eq!(scored.len(), subdomains.len());
        for name in &subdomains {
            assert_eq!(scored.iter().filter(|s| &s.subdomain == name).count(), 1);
        }
    }

    #[test]
    fn test_parse_response_aligns_to_input() {
        let subdomains = names(&["admin.example.com", "www.example.com"]);
        let text = r#"Here are the scores:
[
  {"subdomain": "admin.example.com", "score": 9, "reason": "admin panel"},
  {"subdomain": "ghost.example.com", "score": 3, "reason": "unknown"}
]
Done."#;

        let scored = AiFilter::parse_response(&subdomains, text);
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].subdomain, "admin.example.com");
        assert_eq!(scored[0].score, 9);
        // 模型漏掉的条目补0分记录
        assert_eq!(scored[1].subdomain, "www.example.com");
        assert_eq!(scored[1].score, 0);
    }

    #[test]
    fn test_parse_response_garbage_degrades() {
        let subdomains = names(&["a.example.com", "b.example.com"]);
        let scored = AiFilter::parse_response(&subdomains, "no json here");

        assert_eq!(scored.len(), 2);
        assert!(scored.iter().all(|s| s.score == 0));
    }

    #[test]
    fn test_empty_input() {
        let scored = AiFilter::mock_results(&[]);
        assert!(scored.is_empty());
    }
}
