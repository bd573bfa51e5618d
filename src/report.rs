use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ai_filter::ScoredSubdomain;

/// 报告数据，枚举核心只负责产出这一结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub domain: String,
    pub scan_time: String,
    pub scored_subdomains: Vec<ScoredSubdomain>,
}

impl ReportData {
    pub fn new(domain: &str, scored_subdomains: Vec<ScoredSubdomain>) -> Self {
        ReportData {
            domain: domain.to_string(),
            scan_time: chrono::Local::now().format("%Y%m%d_%H%M%S").to_string(),
            scored_subdomains,
        }
    }
}

/// 保存JSON结果文件，返回落盘路径
pub fn save_json_results(
    data: &ReportData,
    output_dir: &str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    fs::create_dir_all(output_dir)?;

    let path = Path::new(output_dir).join(format!("{}_{}_ranked.json", data.domain, data.scan_time));
    let json_data = serde_json::to_string_pretty(data)?;
    fs::write(&path, json_data)?;

    Ok(path)
}

/// 生成HTML报告，返回落盘路径
pub fn generate_html_report(
    data: &ReportData,
    output_dir: &str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    fs::create_dir_all(output_dir)?;

    let path = Path::new(output_dir).join(format!("{}_{}_report.html", data.domain, data.scan_time));
    fs::write(&path, render_html(data))?;

    Ok(path)
}

fn render_html(data: &ReportData) -> String {
    let total = data.scored_subdomains.len();
    let high = data.scored_subdomains.iter().filter(|s| s.score >= 8).count();
    let medium = data
        .scored_subdomains
        .iter()
        .filter(|s| s.score >= 5 && s.score < 8)
        .count();
    let low = data
        .scored_subdomains
        .iter()
        .filter(|s| s.score >= 1 && s.score < 5)
        .count();
    let avg_score = if total > 0 {
        data.scored_subdomains.iter().map(|s| s.score as f64).sum::<f64>() / total as f64
    } else {
        0.0
    };

    // 按得分降序展示
    let mut sorted: Vec<&ScoredSubdomain> = data.scored_subdomains.iter().collect();
    sorted.sort_by(|a, b| b.score.cmp(&a.score));

    let mut table_rows = String::new();
    for item in sorted {
        let (risk_level, risk_class, color) = risk_of(item.score);
        table_rows.push_str(&format!(
            r#"        <tr>
            <td>{}</td>
            <td>
                <div>{}/10</div>
                <div class="score-bar"><div class="score-value" style="width: {}%; background-color: {};"></div></div>
            </td>
            <td><span class="risk-badge {}">{}</span></td>
            <td>{}</td>
        </tr>
"#,
            escape_html(&item.subdomain),
            item.score,
            item.score as usize * 10,
            color,
            risk_class,
            risk_level,
            escape_html(&item.reason)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>rsmartsub Report - {domain}</title>
    <style>
        body {{ font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background-color: #f5f7fa; color: #333; margin: 0; }}
        header {{ background-color: #4a6fa5; color: #fff; padding: 20px 40px; }}
        main {{ padding: 20px 40px; }}
        .stats {{ display: flex; gap: 16px; margin-bottom: 24px; }}
        .stat-card {{ background: #fff; border-radius: 8px; padding: 16px 24px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }}
        .stat-card .value {{ font-size: 28px; font-weight: bold; }}
        table {{ width: 100%; border-collapse: collapse; background: #fff; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }}
        th, td {{ padding: 10px 14px; text-align: left; border-bottom: 1px solid #e3e8ee; }}
        th {{ background-color: #336699; color: #fff; }}
        .score-bar {{ width: 100px; height: 8px; background: #e3e8ee; border-radius: 4px; overflow: hidden; }}
        .score-value {{ height: 100%; }}
        .risk-badge {{ padding: 2px 10px; border-radius: 12px; color: #fff; font-size: 12px; }}
        .risk-high {{ background-color: #ff4d4d; }}
        .risk-medium {{ background-color: #ffa64d; }}
        .risk-low {{ background-color: #4dbd74; }}
    </style>
</head>
<body>
    <header>
        <h1>rsmartsub Report</h1>
        <p>Target: {domain} | Scan time: {scan_time}</p>
    </header>
    <main>
        <div class="stats">
            <div class="stat-card"><div class="value">{total}</div><div>Subdomains</div></div>
            <div class="stat-card"><div class="value">{high}</div><div>High risk</div></div>
            <div class="stat-card"><div class="value">{medium}</div><div>Medium risk</div></div>
            <div class="stat-card"><div class="value">{low}</div><div>Low risk</div></div>
            <div class="stat-card"><div class="value">{avg_score:.1}</div><div>Average score</div></div>
        </div>
        <table>
            <thead>
                <tr><th>Subdomain</th><th>Score</th><th>Risk</th><th>Reason</th></tr>
            </thead>
            <tbody>
{table_rows}            </tbody>
        </table>
    </main>
</body>
</html>
"#,
        domain = escape_html(&data.domain),
        scan_time = escape_html(&data.scan_time),
        total = total,
        high = high,
        medium = medium,
        low = low,
        avg_score = avg_score,
        table_rows = table_rows,
    )
}

fn risk_of(score: u8) -> (&'static str, &'static str, &'static str) {
    if score >= 8 {
        ("High", "risk-high", "#ff4d4d")
    } else if score >= 5 {
        ("Medium", "risk-medium", "#ffa64d")
    } else {
        ("Low", "risk-low", "#4dbd74")
    }
}

/// HTML转义
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data(dir_tag: &str) -> ReportData {
        ReportData {
            domain: format!("{}.example.com", dir_tag),
            scan_time: "20260823_120000".to_string(),
            scored_subdomains: vec![
                ScoredSubdomain {
                    subdomain: "admin.example.com".to_string(),
                    score: 9,
                    reason: "Administrative interface".to_string(),
                },
                ScoredSubdomain {
                    subdomain: "www.example.com".to_string(),
                    score: 5,
                    reason: "Standard <b>subdomain</b>".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_save_json_results() {
        let dir = tempfile::tempdir().unwrap();
        let data = sample_data("json");

        let path = save_json_results(&data, dir.path().to_str().unwrap()).unwrap();
        assert!(path.exists());

        let content = fs::read_to_string(&path).unwrap();
        let parsed: ReportData = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.domain, data.domain);
        assert_eq!(parsed.scored_subdomains.len(), 2);
    }

    #[test]
    fn test_generate_html_report_escapes() {
        let dir = tempfile::tempdir().unwrap();
        let data = sample_data("html");

        let path = generate_html_report(&data, dir.path().to_str().unwrap()).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert!(content.contains("admin.example.com"));
        assert!(content.contains("&lt;b&gt;subdomain&lt;/b&gt;"));
        assert!(!content.contains("<b>subdomain</b>"));
    }

    #[test]
    fn test_html_risk_buckets() {
        let html = render_html(&sample_data("risk"));
        assert!(html.contains("risk-high"));
        assert!(html.contains("risk-medium"));
    }
}
