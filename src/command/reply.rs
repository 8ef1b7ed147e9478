use std::fmt;

/// Результат выполнения команды.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Успех без данных.
    Ok,
    /// Отсутствующее значение.
    Nil,
    /// Одно значение.
    Bulk(String),
    Integer(i64),
    /// Пара ключ-значение.
    Entry { key: String, value: String },
    /// Упорядоченный набор пар.
    Entries(Vec<(String, String)>),
    /// Произвольный многострочный текст (HELP, ENGINE).
    Text(String),
}

impl Reply {
    pub(crate) fn entry(
        key: &str,
        value: &str,
    ) -> Self {
        Self::Entry {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    pub(crate) fn optional_entry(entry: Option<(&String, &String)>) -> Self {
        match entry {
            Some((key, value)) => Self::entry(key, value),
            None => Self::Nil,
        }
    }

    pub(crate) fn entries<'a, I>(iter: I) -> Self
    where
        I: Iterator<Item = (&'a String, &'a String)>,
    {
        Self::Entries(iter.map(|(k, v)| (k.clone(), v.clone())).collect())
    }
}

impl fmt::Display for Reply {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Nil => write!(f, "(nil)"),
            Self::Bulk(value) => write!(f, "\"{value}\""),
            Self::Integer(n) => write!(f, "(integer) {n}"),
            Self::Entry { key, value } => write!(f, "{key} => \"{value}\""),
            Self::Entries(entries) if entries.is_empty() => write!(f, "(empty)"),
            Self::Entries(entries) => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}) {key} => \"{value}\"", i + 1)?;
                }
                Ok(())
            }
            Self::Text(text) => write!(f, "{}", text.trim_end()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Reply::Ok.to_string(), "OK");
        assert_eq!(Reply::Nil.to_string(), "(nil)");
        assert_eq!(Reply::Integer(3).to_string(), "(integer) 3");
        assert_eq!(Reply::entry("a", "1").to_string(), "a => \"1\"");
        assert_eq!(Reply::Entries(vec![]).to_string(), "(empty)");
        assert_eq!(Reply::Text("line\n".into()).to_string(), "line");
    }

    #[test]
    fn test_entries_are_numbered() {
        let reply = Reply::Entries(vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
        ]);

        assert_eq!(reply.to_string(), "1) a => \"1\"\n2) b => \"2\"");
    }
}
