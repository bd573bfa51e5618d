use std::fs::File;
use std::io::{self, BufRead};

use log::{info, warn};

/// 从字典文件加载候选词
///
/// 每个非空行去掉首尾空白后作为一个候选词。文件不存在或不可读时
/// 打印警告并返回空列表，由调用方决定空结果是否致命。
pub fn load_wordlist(path: &str) -> Vec<String> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!("无法读取字典文件 {}: {}", path, e);
            return Vec::new();
        }
    };

    let reader = io::BufReader::new(file);
    let mut words = Vec::new();

    for line in reader.lines() {
        if let Ok(word) = line {
            let word = word.trim();
            if !word.is_empty() {
                words.push(word.to_string());
            }
        }
    }

    info!("从字典加载了 {} 个候选词", words.len());
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_wordlist_trims_and_skips_blanks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "www").unwrap();
        writeln!(file, "  admin  ").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "\t").unwrap();
        writeln!(file, "mail").unwrap();

        let words = load_wordlist(file.path().to_str().unwrap());
        assert_eq!(words, vec!["www", "admin", "mail"]);
    }

    #[test]
    fn test_load_wordlist_missing_file() {
        let words = load_wordlist("/nonexistent/wordlist.txt");
        assert!(words.is_empty());
    }
}
