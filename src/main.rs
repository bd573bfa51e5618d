use clap::Parser;
use log::{error, info};

use rsmartsub::ai_filter::AiFilter;
use rsmartsub::enumerator::{EnumerationConfig, SubdomainEnumerator};
use rsmartsub::input::Opts;
use rsmartsub::logger;
use rsmartsub::probe::{DnsProber, ProbeConfig};
use rsmartsub::report::{self, ReportData};

const BANNER: &str = r#"
                                 _           _
  _ __ ___ _ __ ___   __ _ _ __| |_ ___ _  _| |__
 | '__/ __| '_ ` _ \ / _` | '__| __/ __| || | '_ \
 | |  \__ \ | | | | | (_| | |  | |_\__ \ || | |_) |
 |_|  |___/_| |_| |_|\__,_|_|   \__|___/\__,_|_.__/

 Subdomain Enumeration with AI-Powered Risk Assessment
"#;

#[tokio::main]
async fn main() {
    let opts = Opts::parse();
    logger::init_logger();

    if !opts.silent {
        println!("{}", BANNER);
    }

    if let Err(e) = run(opts).await {
        error!("执行失败: {}", e);
        std::process::exit(1);
    }
}

async fn run(opts: Opts) -> Result<(), Box<dyn std::error::Error>> {
    // 枚举子域名
    let subdomains = run_enumeration(&opts).await;
    if subdomains.is_empty() {
        return Err("未发现任何子域名".into());
    }

    // AI打分
    info!("开始对 {} 个子域名打分", subdomains.len());
    let ai_filter = AiFilter::new(None, opts.model.clone(), opts.test)?;
    let scored = ai_filter.score_subdomains(&subdomains).await;

    // 保存报告
    let data = ReportData::new(&opts.domain, scored);
    let json_path = report::save_json_results(&data, &opts.output_dir)?;
    logger::success(&format!("JSON结果已保存到: {}", json_path.display()));

    let html_path = report::generate_html_report(&data, &opts.output_dir)?;
    logger::success(&format!("HTML报告已生成: {}", html_path.display()));

    // 展示渗透价值最高的前10个子域名
    if !opts.silent {
        print_top_subdomains(&data);
    }

    Ok(())
}

/// 执行子域名枚举
async fn run_enumeration(opts: &Opts) -> Vec<String> {
    let config = EnumerationConfig {
        domain: opts.domain.clone(),
        wordlist_path: Some(opts.wordlist.clone()),
        threads: opts.threads,
        max_subdomains: opts.max_subdomains(),
    };

    let prober = DnsProber::new(ProbeConfig::default(), opts.silent);
    SubdomainEnumerator::new(config, prober).enumerate().await
}

/// 打印得分最高的前10个子域名
fn print_top_subdomains(data: &ReportData) {
    let mut sorted: Vec<_> = data.scored_subdomains.iter().collect();
    sorted.sort_by(|a, b| b.score.cmp(&a.score));

    info!("渗透价值前10的子域名:");
    for item in sorted.iter().take(10) {
        info!("  {} (得分: {}) - {}", item.subdomain, item.score, item.reason);
    }
}
