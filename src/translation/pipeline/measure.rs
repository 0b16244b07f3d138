//! 度量单位换算
//!
//! 将文本中出现的英制长度和重量换算为公制，在调用后端之前执行。
//! 换算结果按量级选择单位并四舍五入为整数。

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// 匹配 `<数字>[.<数字>] <单位>[s]`，单位不区分大小写
static MEASUREMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(inch(?:es)?|foot|feet|yd|yard|mile|oz|ounce|lb|pound)s?")
        .expect("measurement pattern is valid")
});

/// 每单位对应的米数
const METERS_PER_UNIT: &[(&str, f64)] = &[
    ("inch", 0.0254),
    ("inches", 0.0254),
    ("foot", 0.3048),
    ("feet", 0.3048),
    ("yd", 0.9144),
    ("yard", 0.9144),
    ("mile", 1609.34),
];

/// 每单位对应的千克数
const KILOGRAMS_PER_UNIT: &[(&str, f64)] = &[
    ("oz", 0.0283495),
    ("ounce", 0.0283495),
    ("lb", 0.453592),
    ("pound", 0.453592),
];

/// 公制单位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
    Centimeter,
    Meter,
    Kilometer,
    Gram,
    Kilogram,
}

impl MetricUnit {
    /// 单数形式的单位名
    pub fn name(&self) -> &'static str {
        match self {
            MetricUnit::Centimeter => "centimeter",
            MetricUnit::Meter => "meter",
            MetricUnit::Kilometer => "kilometer",
            MetricUnit::Gram => "gram",
            MetricUnit::Kilogram => "kilogram",
        }
    }
}

/// 换算后的度量值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub value: i64,
    pub unit: MetricUnit,
}

impl fmt::Display for Measurement {
    /// 输出形式固定为 `"<数值> <单位>s"`，单位无条件使用复数
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}s", self.value, self.unit.name())
    }
}

fn lookup(table: &[(&str, f64)], unit: &str) -> Option<f64> {
    let unit = unit.to_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, factor)| *factor)
}

/// 四舍五入为整数；非有限值或超出 `i64` 范围时返回 `None`
fn round_to_whole(value: f64) -> Option<i64> {
    let rounded = value.round();
    if rounded.is_finite() && rounded.abs() < i64::MAX as f64 {
        Some(rounded as i64)
    } else {
        None
    }
}

/// 长度换算
///
/// 结果小于 1 米时以厘米表示，大于 1000 米时以千米表示，否则以米表示。
/// 无法识别的单位或无法表示的结果返回 `None`。
pub fn convert_distance(value: f64, unit: &str) -> Option<Measurement> {
    let meters = value * lookup(METERS_PER_UNIT, unit)?;

    let (scaled, unit) = if meters < 1.0 {
        (meters * 100.0, MetricUnit::Centimeter)
    } else if meters > 1000.0 {
        (meters / 1000.0, MetricUnit::Kilometer)
    } else {
        (meters, MetricUnit::Meter)
    };

    Some(Measurement {
        value: round_to_whole(scaled)?,
        unit,
    })
}

/// 重量换算
///
/// 结果小于 1 千克时以克表示，否则以千克表示。
/// 无法识别的单位或无法表示的结果返回 `None`。
pub fn convert_mass(value: f64, unit: &str) -> Option<Measurement> {
    let kilograms = value * lookup(KILOGRAMS_PER_UNIT, unit)?;

    let (scaled, unit) = if kilograms < 1.0 {
        (kilograms * 1000.0, MetricUnit::Gram)
    } else {
        (kilograms, MetricUnit::Kilogram)
    };

    Some(Measurement {
        value: round_to_whole(scaled)?,
        unit,
    })
}

fn replace_pass(text: &str, convert: fn(f64, &str) -> Option<Measurement>) -> String {
    MEASUREMENT_RE
        .replace_all(text, |caps: &Captures| {
            let converted = caps[1]
                .parse::<f64>()
                .ok()
                .and_then(|value| convert(value, &caps[2]));

            match converted {
                Some(measurement) => measurement.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// 换算文本中的所有度量
///
/// 对同一模式执行两遍独立扫描：先长度后重量。第一遍已换算的内容在第二遍中
/// 只是普通文本，不会被再次匹配；未匹配的文本原样保留。
pub fn convert_measurements_in_text(text: &str) -> String {
    let text = replace_pass(text, convert_distance);
    replace_pass(&text, convert_mass)
}
