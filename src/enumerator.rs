use std::sync::Arc;

use log::info;
use tokio::sync::Semaphore;

use crate::collector::DiscoverySet;
use crate::probe::{DnsProber, ProbeConfig, ProbeOutcome, SubdomainProbe};
use crate::wordlist;

/// 子域名枚举配置
#[derive(Debug, Clone)]
pub struct EnumerationConfig {
    /// 目标域名
    pub domain: String,
    /// 字典文件路径
    pub wordlist_path: Option<String>,
    /// 工作线程数量
    pub threads: usize,
    /// 子域名数量上限，None 表示不限制
    pub max_subdomains: Option<usize>,
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        EnumerationConfig {
            domain: String::new(),
            wordlist_path: None,
            threads: 10,
            max_subdomains: Some(200),
        }
    }
}

/// 子域名枚举器
///
/// 固定宽度的工作池从字典派发候选域名，探测成功的结果汇入收集器，
/// 所有任务结束后输出一次排序快照。单个候选的解析失败不会中止整个
/// 枚举过程。
pub struct SubdomainEnumerator<P> {
    config: EnumerationConfig,
    probe: Arc<P>,
}

impl<P: SubdomainProbe + 'static> SubdomainEnumerator<P> {
    pub fn new(config: EnumerationConfig, probe: P) -> Self {
        SubdomainEnumerator {
            config,
            probe: Arc::new(probe),
        }
    }

    /// 执行枚举，返回按字典序排列的去重子域名列表
    ///
    /// 字典为空或文件缺失时返回空列表而不是错误，是否视为致命由调
    /// 用方决定。
    pub async fn enumerate(&self) -> Vec<String> {
        info!("开始枚举目标域名: {}", self.config.domain);

        let words = match &self.config.wordlist_path {
            Some(path) => wordlist::load_wordlist(path),
            None => Vec::new(),
        };

        let threads = if self.config.threads == 0 {
            10
        } else {
            self.config.threads
        };
        let semaphore = Arc::new(Semaphore::new(threads));
        let found = Arc::new(DiscoverySet::new(self.config.max_subdomains));
        let mut tasks = Vec::new();

        for word in words {
            // 派发前的粗略检查，仅用于提前停止派发；该读取与插入不在
            // 同一临界区，正在运行的任务仍可能竞争，上限的正确性只由
            // try_insert 保证
            if let Some(max) = self.config.max_subdomains {
                if found.len() >= max {
                    info!("已达到子域名上限 {}，停止派发剩余候选", max);
                    break;
                }
            }

            let candidate = format!("{}.{}", word, self.config.domain);
            let permit = Arc::clone(&semaphore);
            let probe = Arc::clone(&self.probe);
            let found = Arc::clone(&found);

            tasks.push(tokio::spawn(async move {
                let _permit = permit.acquire().await.unwrap();
                match probe.probe(&candidate).await {
                    ProbeOutcome::Found { .. } => {
                        // 返回 false 说明上限已被并发任务占满，属预期情况
                        let _ = found.try_insert(&candidate);
                    }
                    // 未命中与瞬时错误等价处理，均不重试
                    ProbeOutcome::NotFound | ProbeOutcome::TransientError { .. } => {}
                }
            }));
        }

        // 等待所有已派发任务结束，任务内部不产生可传播的错误
        for task in tasks {
            let _ = task.await;
        }

        let results = found.snapshot_sorted();
        info!("共发现 {} 个子域名", results.len());
        results
    }
}

/// 便捷的枚举函数，使用默认DNS探测器配置
pub async fn enumerate_subdomains(domain: &str, wordlist_path: Option<String>) -> Vec<String> {
    let config = EnumerationConfig {
        domain: domain.to_string(),
        wordlist_path,
        ..Default::default()
    };

    let prober = DnsProber::new(ProbeConfig::default(), false);
    SubdomainEnumerator::new(config, prober).enumerate().await
}
