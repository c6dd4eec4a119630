//! Classroom exercises on discount pricing, solved with the same functions
//! the simulator uses. Each exercise carries the figure published with the
//! hand-worked solution so the two can be compared.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::pricing::{compute_purchase_price, implied_discount_rate};
use crate::types::{Days, Money, Rate};
use crate::CetesResult;

/// What an exercise asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "solve_for", rename_all = "snake_case")]
pub enum Question {
    /// Price per title from a quoted discount rate.
    Price {
        face_value: Money,
        discount_rate: Rate,
        days: Days,
    },
    /// Discount rate implied by the price paid.
    DiscountRate {
        face_value: Money,
        price: Money,
        days: Days,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub number: u8,
    pub statement: String,
    pub question: Question,
    /// Answer given with the hand-worked solution.
    pub published_answer: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseSolution {
    pub number: u8,
    pub statement: String,
    pub solve_for: String,
    pub answer: Decimal,
    pub published_answer: Decimal,
    /// `answer - published_answer`
    pub difference: Decimal,
}

pub fn worked_exercises() -> Vec<Exercise> {
    vec![
        Exercise {
            number: 1,
            statement: "CETES with 139 days to maturity and a 4.25% discount rate: find the price"
                .into(),
            question: Question::Price {
                face_value: dec!(10),
                discount_rate: dec!(0.0425),
                days: 139,
            },
            published_answer: dec!(9.8369),
        },
        Exercise {
            number: 2,
            statement: "PRLV with 49 days to maturity, face value 1.00, bought at 0.984513: find the discount rate"
                .into(),
            question: Question::DiscountRate {
                face_value: dec!(1.00),
                price: dec!(0.984513),
                days: 49,
            },
            published_answer: dec!(0.1136),
        },
        Exercise {
            number: 3,
            statement: "CETES with 87 days to maturity and a 4.15% discount rate: find the price"
                .into(),
            question: Question::Price {
                face_value: dec!(10),
                discount_rate: dec!(0.0415),
                days: 87,
            },
            published_answer: dec!(9.8995),
        },
        Exercise {
            number: 4,
            statement: "Bank acceptance, face value 100, 221 days to maturity, bought at 96.930556: find the discount rate"
                .into(),
            question: Question::DiscountRate {
                face_value: dec!(100),
                price: dec!(96.930556),
                days: 221,
            },
            published_answer: dec!(0.0500),
        },
    ]
}

pub fn solve(exercise: &Exercise) -> CetesResult<ExerciseSolution> {
    let (solve_for, answer) = match exercise.question {
        Question::Price {
            face_value,
            discount_rate,
            days,
        } => ("price", compute_purchase_price(face_value, discount_rate, days)?),
        Question::DiscountRate {
            face_value,
            price,
            days,
        } => ("discount_rate", implied_discount_rate(face_value, price, days)?),
    };

    Ok(ExerciseSolution {
        number: exercise.number,
        statement: exercise.statement.clone(),
        solve_for: solve_for.to_string(),
        answer,
        published_answer: exercise.published_answer,
        difference: answer - exercise.published_answer,
    })
}

pub fn solve_all() -> CetesResult<Vec<ExerciseSolution>> {
    worked_exercises().iter().map(solve).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_exercises_solve_near_published_answers() {
        let solutions = solve_all().unwrap();
        assert_eq!(solutions.len(), 4);
        for s in &solutions {
            // Published answers were rounded by hand along the way.
            assert!(
                s.difference.abs() < dec!(0.002),
                "exercise {} off by {}",
                s.number,
                s.difference
            );
        }
    }

    #[test]
    fn test_exercise_kinds() {
        let solutions = solve_all().unwrap();
        let kinds: Vec<&str> = solutions.iter().map(|s| s.solve_for.as_str()).collect();
        assert_eq!(kinds, vec!["price", "discount_rate", "price", "discount_rate"]);
    }

    #[test]
    fn test_exercise_four_is_five_percent() {
        let solutions = solve_all().unwrap();
        assert!((solutions[3].answer - dec!(0.05)).abs() < dec!(0.00001));
    }
}
