//! 이상치 탐지.
//!
//! 정렬된 숫자 컬럼에 대해 행마다 이상치 여부를 표시합니다.
//!
//! - **Z-Score**: 모표준편차 기준 `|z| > threshold`
//! - **IQR**: 선형 보간 Q1/Q3, `[Q1 - t·IQR, Q3 + t·IQR]` 밖의 값
//!
//! 빈 입력은 빈 결과를 반환하며, 알 수 없는 방법 이름은 플래그 없이 경고만
//! 남깁니다. 어느 경우도 오류로 중단하지 않습니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::indicators::statistics::{mean, population_std, quantile};

/// 탐지 방법.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlierMethod {
    ZScore,
    Iqr,
}

impl fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlierMethod::ZScore => f.write_str("zscore"),
            OutlierMethod::Iqr => f.write_str("iqr"),
        }
    }
}

impl FromStr for OutlierMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zscore" | "z-score" | "z_score" => Ok(OutlierMethod::ZScore),
            "iqr" => Ok(OutlierMethod::Iqr),
            _ => Err(format!("Unknown outlier method: {}", s)),
        }
    }
}

/// 탐지 결과.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    /// 입력과 같은 길이의 행별 플래그
    pub flags: Vec<bool>,
    /// 사용된 방법 (알 수 없는 이름이면 `None`)
    pub method: Option<OutlierMethod>,
    /// 설정 경고
    pub warning: Option<String>,
    /// 정상 구간 하한
    pub lower_bound: Option<f64>,
    /// 정상 구간 상한
    pub upper_bound: Option<f64>,
}

impl OutlierReport {
    fn unflagged(len: usize, method: Option<OutlierMethod>) -> Self {
        Self {
            flags: vec![false; len],
            method,
            ..Default::default()
        }
    }

    /// 플래그된 행 수.
    pub fn flagged_count(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }

    /// 플래그된 행 인덱스.
    pub fn flagged_indices(&self) -> Vec<usize> {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(i, &f)| f.then_some(i))
            .collect()
    }
}

/// 이상치 탐지기.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierDetector {
    threshold: f64,
}

impl Default for OutlierDetector {
    fn default() -> Self {
        Self::new(3.0)
    }
}

impl OutlierDetector {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// 지정한 방법으로 탐지합니다.
    pub fn detect(&self, values: &[f64], method: OutlierMethod) -> OutlierReport {
        if values.is_empty() {
            warn!(%method, "빈 입력, 이상치 탐지 생략");
            return OutlierReport::unflagged(0, Some(method));
        }

        let report = match method {
            OutlierMethod::ZScore => self.zscore(values),
            OutlierMethod::Iqr => self.iqr(values),
        };

        debug!(
            %method,
            threshold = self.threshold,
            rows = values.len(),
            flagged = report.flagged_count(),
            "이상치 탐지 완료"
        );
        report
    }

    /// 방법 이름으로 탐지합니다.
    ///
    /// 알 수 없는 이름이면 아무것도 표시하지 않고 `warning`을 채웁니다.
    pub fn detect_by_name(&self, values: &[f64], method: &str) -> OutlierReport {
        match method.parse::<OutlierMethod>() {
            Ok(method) => self.detect(values, method),
            Err(_) => {
                let message = format!("알 수 없는 이상치 탐지 방법 '{}': 표시된 행 없음", method);
                warn!(method, "{}", message);
                OutlierReport {
                    warning: Some(message),
                    ..OutlierReport::unflagged(values.len(), None)
                }
            }
        }
    }

    fn zscore(&self, values: &[f64]) -> OutlierReport {
        let (Some(mean), Some(std_dev)) = (mean(values), population_std(values)) else {
            return OutlierReport::unflagged(values.len(), Some(OutlierMethod::ZScore));
        };

        if std_dev == 0.0 || !std_dev.is_finite() {
            debug!("표준편차 0, 이상치 없음");
            return OutlierReport::unflagged(values.len(), Some(OutlierMethod::ZScore));
        }

        let flags = values
            .iter()
            .map(|&x| ((x - mean) / std_dev).abs() > self.threshold)
            .collect();

        OutlierReport {
            flags,
            method: Some(OutlierMethod::ZScore),
            warning: None,
            lower_bound: Some(mean - self.threshold * std_dev),
            upper_bound: Some(mean + self.threshold * std_dev),
        }
    }

    fn iqr(&self, values: &[f64]) -> OutlierReport {
        let (Some(q1), Some(q3)) = (quantile(values, 0.25), quantile(values, 0.75)) else {
            return OutlierReport::unflagged(values.len(), Some(OutlierMethod::Iqr));
        };

        let iqr = q3 - q1;
        let lower = q1 - self.threshold * iqr;
        let upper = q3 + self.threshold * iqr;

        OutlierReport {
            flags: values.iter().map(|&x| x < lower || x > upper).collect(),
            method: Some(OutlierMethod::Iqr),
            warning: None,
            lower_bound: Some(lower),
            upper_bound: Some(upper),
        }
    }
}
