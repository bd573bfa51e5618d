use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "rsmartsub")]
#[command(version = "0.1.0")]
#[command(about = "Subdomain enumeration with AI-powered risk scoring", long_about = None, arg_required_else_help = true)]
pub struct Opts {
    /// target domain to enumerate
    #[arg(short, long)]
    pub domain: String,

    /// wordlist path
    #[arg(short, long, default_value = "wordlists/subdomains.txt")]
    pub wordlist: String,

    /// number of worker threads
    #[arg(short, long, default_value_t = 10)]
    pub threads: usize,

    /// maximum number of subdomains to collect
    #[arg(long, default_value_t = 200)]
    pub limit: usize,

    /// remove the subdomain limit
    #[arg(long)]
    pub no_limit: bool,

    /// cohere model for scoring
    #[arg(long)]
    pub model: Option<String>,

    /// test mode - score with the builtin heuristic instead of the AI API
    #[arg(long)]
    pub test: bool,

    /// output directory for reports
    #[arg(short, long, default_value = "results")]
    pub output_dir: String,

    /// silent - only print discovered subdomains
    #[arg(short, long, default_value_t = false)]
    pub silent: bool,
}

impl Opts {
    /// 解析结果上限，--no-limit 表示不限制
    pub fn max_subdomains(&self) -> Option<usize> {
        if self.no_limit {
            None
        } else {
            Some(self.limit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_subdomains() {
        let opts = Opts::parse_from(["rsmartsub", "-d", "example.com"]);
        assert_eq!(opts.max_subdomains(), Some(200));

        let opts = Opts::parse_from(["rsmartsub", "-d", "example.com", "--no-limit"]);
        assert_eq!(opts.max_subdomains(), None);

        let opts = Opts::parse_from(["rsmartsub", "-d", "example.com", "--limit", "50"]);
        assert_eq!(opts.max_subdomains(), Some(50));
    }
}
