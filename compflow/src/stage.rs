//! Compiler pipeline stages.
use crate::color::Color;

/// One phase of the compiler pipeline, as drawn in the flowchart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    /// Bilingual display label, Chinese name above the English one.
    pub name: &'static str,
    /// Short explanation shown to the right of the stage.
    pub description: &'static str,
    /// Artifact flowing into the stage.
    pub input: &'static str,
    /// Artifact produced by the stage.
    pub output: &'static str,
    /// Vertical centre of the stage in figure coordinates.
    pub y: f32,
    /// Fill of the main box.
    pub color: Color,
}

impl Stage {
    /// The first line of the name, without the English translation.
    pub fn short_name(&self) -> &'static str {
        self.name.lines().next().unwrap_or(self.name)
    }
}

/// Stages in pipeline order, which is also their top to bottom order.
pub static STAGES: [Stage; 6] = [
    Stage {
        name: "词法分析\n(Lexical Analysis)",
        description: "源代码字符流 → 单词/记号(token)",
        input: "源代码(.i)",
        output: "Token序列",
        y: 10.0,
        color: Color::from_u32(0xFF6B6B),
    },
    Stage {
        name: "语法分析\n(Syntax Analysis)",
        description: "Token串 → 语法树(AST)",
        input: "Token序列",
        output: "抽象语法树",
        y: 8.5,
        color: Color::from_u32(0x4ECDC4),
    },
    Stage {
        name: "语义分析\n(Semantic Analysis)",
        description: "检查类型、作用域、语义正确性",
        input: "抽象语法树",
        output: "带语义信息的AST",
        y: 7.0,
        color: Color::from_u32(0x45B7D1),
    },
    Stage {
        name: "中间代码生成\n(IR Generation)",
        description: "语法树 → 中间表示(IR)",
        input: "带语义信息的AST",
        output: "中间代码(IR)",
        y: 5.5,
        color: Color::from_u32(0x96CEB4),
    },
    Stage {
        name: "优化\n(Optimization)",
        description: "对IR进行优化，提高执行效率",
        input: "中间代码(IR)",
        output: "优化后的IR",
        y: 4.0,
        color: Color::from_u32(0xFFEAA7),
    },
    Stage {
        name: "目标代码生成\n(Code Generation)",
        description: "生成汇编代码(.s)",
        input: "优化后的IR",
        output: "汇编代码(.s)",
        y: 2.5,
        color: Color::from_u32(0xDDA0DD),
    },
];

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn test_stages_top_to_bottom() {
        let ys: Vec<f32> = STAGES.iter().map(|stage| stage.y).collect();
        assert_eq!(ys, [10.0, 8.5, 7.0, 5.5, 4.0, 2.5]);
        assert!(STAGES.iter().tuple_windows().all(|(a, b)| a.y > b.y));
    }

    /// Each stage consumes what the previous one produced.
    #[test]
    fn test_stages_chain_artifacts() {
        for (prev, next) in STAGES.iter().tuple_windows() {
            assert_eq!(prev.output, next.input, "{} -> {}", prev.name, next.name);
        }
    }

    #[test]
    fn test_short_name() {
        assert_eq!(STAGES[0].short_name(), "词法分析");
        assert_eq!(STAGES[5].short_name(), "目标代码生成");
    }
}
