//! # rsmartsub
//!
//! 一个基于Rust实现的子域名枚举与AI风险评分工具库。
//!
//! ## 特性
//!
//! - 🚀 **并发枚举**: 固定宽度工作池并发解析字典候选，单个失败不影响整体
//! - 🔍 **多记录类型**: 按 A、AAAA、CNAME 固定顺序探测，命中即停
//! - 📊 **有界收集**: 线程安全的去重收集器，结果数量上限在插入时严格保证
//! - 🤖 **AI评分**: 通过Cohere模型对发现的子域名做渗透价值打分，支持离线启发式模式
//! - 📄 **报告输出**: 生成JSON与HTML两种报告产物
//!
//! ## 快速开始
//!
//! ```rust,no_run
//! use rsmartsub::enumerate_subdomains;
//!
//! #[tokio::main]
//! async fn main() {
//!     let subdomains =
//!         enumerate_subdomains("example.com", Some("wordlists/subdomains.txt".to_string())).await;
//!
//!     println!("发现 {} 个子域名", subdomains.len());
//!     for name in subdomains.iter().take(5) {
//!         println!("  {}", name);
//!     }
//! }
//! ```
//!
//! ## 高级配置
//!
//! ```rust,no_run
//! use rsmartsub::{DnsProber, EnumerationConfig, ProbeConfig, SubdomainEnumerator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = EnumerationConfig {
//!         domain: "example.com".to_string(),
//!         wordlist_path: Some("wordlists/subdomains.txt".to_string()),
//!         threads: 30,
//!         max_subdomains: None, // 不限制结果数量
//!     };
//!
//!     let prober = DnsProber::new(ProbeConfig::default(), false);
//!     let enumerator = SubdomainEnumerator::new(config, prober);
//!     let subdomains = enumerator.enumerate().await;
//!
//!     // 处理结果...
//!     let _ = subdomains;
//! }
//! ```

// 内部模块
pub mod ai_filter;
pub mod collector;
pub mod enumerator;
pub mod input;
pub mod logger;
pub mod probe;
pub mod report;
pub mod wordlist;

// 重新导出主要的公共API
pub use enumerator::{enumerate_subdomains, EnumerationConfig, SubdomainEnumerator};
pub use probe::{DnsProber, ProbeConfig, ProbeOutcome, ProbeRecordType, SubdomainProbe};

// 导出其他有用的类型
pub use ai_filter::{AiFilter, ScoredSubdomain, DEFAULT_MODEL};
pub use collector::DiscoverySet;
pub use input::Opts;
pub use report::{generate_html_report, save_json_results, ReportData};
pub use wordlist::load_wordlist;
