use std::time::Duration;

/// 每个字符的显示间隔
pub const CHAR_INTERVAL: Duration = Duration::from_millis(50);
/// 启动画面持续时间
pub const INTRO_DURATION: Duration = Duration::from_secs(2);
pub const CURSOR: char = '|';

/// 打字机效果，每隔 [`CHAR_INTERVAL`] 显示一个字符
#[derive(Debug, Clone)]
pub struct TerminalText {
    text: String,
    chars: usize,
}

impl TerminalText {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let chars = text.chars().count();
        Self { text, chars }
    }

    /// `elapsed` 时刻已显示的字符数
    pub fn revealed(&self, elapsed: Duration) -> usize {
        let steps = elapsed.as_millis() / CHAR_INTERVAL.as_millis();
        usize::try_from(steps).map_or(self.chars, |s| s.min(self.chars))
    }

    /// 已显示的前缀，总在字符边界截断
    pub fn visible_at(&self, elapsed: Duration) -> &str {
        let n = self.revealed(elapsed);
        match self.text.char_indices().nth(n) {
            Some((idx, _)) => &self.text[..idx],
            None => &self.text,
        }
    }

    /// 前缀加光标字符
    pub fn render(&self, elapsed: Duration) -> String {
        let mut out = String::with_capacity(self.text.len() + 1);
        out.push_str(self.visible_at(elapsed));
        out.push(CURSOR);
        out
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        self.revealed(elapsed) == self.chars
    }

    /// 全部显示所需时间
    pub fn duration(&self) -> Duration {
        CHAR_INTERVAL * self.chars as u32
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// 加载画面是否已结束
pub fn intro_finished(since_mount: Duration) -> bool {
    since_mount >= INTRO_DURATION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveals_one_char_per_interval() {
        let text = TerminalText::new("VINAYAK S");

        assert_eq!(text.visible_at(Duration::ZERO), "");
        assert_eq!(text.visible_at(Duration::from_millis(49)), "");
        assert_eq!(text.visible_at(Duration::from_millis(50)), "V");
        assert_eq!(text.visible_at(Duration::from_millis(260)), "VINAY");
        assert_eq!(text.visible_at(Duration::from_secs(10)), "VINAYAK S");
    }

    #[test]
    fn test_multibyte_text() {
        let text = TerminalText::new("安全工程师");

        assert_eq!(text.visible_at(Duration::from_millis(100)), "安全");
        assert!(text.is_complete(text.duration()));
        assert!(!text.is_complete(text.duration() - Duration::from_millis(1)));
    }

    #[test]
    fn test_render_appends_cursor() {
        let text = TerminalText::new("root");
        assert_eq!(text.render(Duration::from_millis(150)), "roo|");
    }

    #[test]
    fn test_intro_gate() {
        assert!(!intro_finished(Duration::from_millis(1999)));
        assert!(intro_finished(INTRO_DURATION));
    }
}
