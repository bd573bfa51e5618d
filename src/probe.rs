use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use async_trait::async_trait;
use trust_dns_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::ResolveErrorKind;
use trust_dns_resolver::proto::rr::RecordType;
use trust_dns_resolver::TokioAsyncResolver;

use crate::logger;

/// DNS探测配置
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// 名称服务器列表
    pub nameservers: Vec<IpAddr>,
    /// 单次查询超时
    pub timeout: Duration,
    /// 失败后的重试次数
    pub attempts: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            nameservers: vec![
                // Google
                IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)),
                IpAddr::V4(Ipv4Addr::new(8, 8, 4, 4)),
                // Cloudflare
                IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)),
                IpAddr::V4(Ipv4Addr::new(1, 0, 0, 1)),
                // Quad9
                IpAddr::V4(Ipv4Addr::new(9, 9, 9, 9)),
                IpAddr::V4(Ipv4Addr::new(149, 112, 112, 112)),
                // OpenDNS
                IpAddr::V4(Ipv4Addr::new(208, 67, 222, 222)),
                IpAddr::V4(Ipv4Addr::new(208, 67, 220, 220)),
            ],
            timeout: Duration::from_secs(1),
            attempts: 0,
        }
    }
}

/// 探测使用的DNS记录类型，按固定顺序尝试
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeRecordType {
    A,
    AAAA,
    CNAME,
}

impl ProbeRecordType {
    /// 固定的尝试顺序
    pub const FALLBACK_ORDER: [ProbeRecordType; 3] = [
        ProbeRecordType::A,
        ProbeRecordType::AAAA,
        ProbeRecordType::CNAME,
    ];

    fn to_record_type(self) -> RecordType {
        match self {
            ProbeRecordType::A => RecordType::A,
            ProbeRecordType::AAAA => RecordType::AAAA,
            ProbeRecordType::CNAME => RecordType::CNAME,
        }
    }
}

impl fmt::Display for ProbeRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeRecordType::A => write!(f, "A"),
            ProbeRecordType::AAAA => write!(f, "AAAA"),
            ProbeRecordType::CNAME => write!(f, "CNAME"),
        }
    }
}

/// 单个候选域名的探测结果
///
/// 所有失败都以值的形式返回，探测函数本身从不向上抛错。
/// TransientError 与 NotFound 对调度器完全等价。
#[derive(Debug, Clone)]
pub enum ProbeOutcome {
    Found {
        record_type: ProbeRecordType,
        value: String,
    },
    NotFound,
    TransientError {
        kind: String,
    },
}

/// 子域名探测接口，测试中可用确定性桩实现替换
#[async_trait]
pub trait SubdomainProbe: Send + Sync {
    async fn probe(&self, name: &str) -> ProbeOutcome;
}

/// 基于trust-dns的探测器
pub struct DnsProber {
    resolver: TokioAsyncResolver,
    silent: bool,
}

impl DnsProber {
    pub fn new(config: ProbeConfig, silent: bool) -> Self {
        let group = NameServerConfigGroup::from_ips_clear(&config.nameservers, 53, true);
        let resolver_config = ResolverConfig::from_parts(None, Vec::new(), group);

        let mut opts = ResolverOpts::default();
        opts.timeout = config.timeout;
        opts.attempts = config.attempts;

        DnsProber {
            resolver: TokioAsyncResolver::tokio(resolver_config, opts),
            silent,
        }
    }
}

#[async_trait]
impl SubdomainProbe for DnsProber {
    async fn probe(&self, name: &str) -> ProbeOutcome {
        let mut transient: Option<String> = None;

        for record_type in ProbeRecordType::FALLBACK_ORDER {
            match self.resolver.lookup(name, record_type.to_record_type()).await {
                Ok(response) => {
                    if let Some(record) = response.iter().next() {
                        let value = record.to_string();
                        if self.silent {
                            println!("{}", name);
                        } else {
                            logger::success(&format!(
                                "发现子域名: {} - {} ({})",
                                name, value, record_type
                            ));
                        }
                        return ProbeOutcome::Found { record_type, value };
                    }
                    // 空应答视为该类型未命中，继续下一个类型
                }
                Err(e) => match e.kind() {
                    // NXDOMAIN或该类型无记录，继续下一个类型
                    ResolveErrorKind::NoRecordsFound { .. } => {}
                    // 超时和传输错误同样继续，不重试本类型
                    _ => transient = Some(e.to_string()),
                },
            }
        }

        match transient {
            Some(kind) => ProbeOutcome::TransientError { kind },
            None => ProbeOutcome::NotFound,
        }
    }
}
