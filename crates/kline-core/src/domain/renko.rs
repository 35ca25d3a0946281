//! 렌코 벽돌 타입.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 벽돌 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrickDirection {
    Up,
    Down,
}

impl fmt::Display for BrickDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrickDirection::Up => f.write_str("Up"),
            BrickDirection::Down => f.write_str("Down"),
        }
    }
}

/// 렌코 입력 포인트.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// epoch ms
    pub timestamp: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: i64, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// 렌코 벽돌. 추가된 뒤에는 변경되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub open: f64,
    pub close: f64,
    pub direction: BrickDirection,
    /// 0부터 시작하는 순번
    pub index: usize,
    /// 벽돌을 만든 입력 포인트의 위치
    pub source_index: usize,
    /// 벽돌을 만든 입력 포인트의 타임스탬프
    pub timestamp: i64,
}

/// 벽돌 시퀀스와 사용된 벽돌 크기.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenkoChart {
    pub brick_size: f64,
    pub bricks: Vec<Brick>,
}

impl RenkoChart {
    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    /// 상승 벽돌 수.
    pub fn up_count(&self) -> usize {
        self.count(BrickDirection::Up)
    }

    /// 하락 벽돌 수.
    pub fn down_count(&self) -> usize {
        self.count(BrickDirection::Down)
    }

    fn count(&self, direction: BrickDirection) -> usize {
        self.bricks.iter().filter(|b| b.direction == direction).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brick(direction: BrickDirection, index: usize) -> Brick {
        Brick {
            open: 0.0,
            close: 1.0,
            direction,
            index,
            source_index: index,
            timestamp: 0,
        }
    }

    #[test]
    fn test_counts() {
        let chart = RenkoChart {
            brick_size: 1.0,
            bricks: vec![
                brick(BrickDirection::Up, 0),
                brick(BrickDirection::Up, 1),
                brick(BrickDirection::Down, 2),
            ],
        };
        assert_eq!(chart.len(), 3);
        assert_eq!(chart.up_count(), 2);
        assert_eq!(chart.down_count(), 1);
        assert!(RenkoChart::default().is_empty());
    }
}
