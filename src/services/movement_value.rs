// src/services/movement_value.rs

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    models::inventory::{MovementType, StockMovement},
};

/// Valor monetário de uma movimentação: quantidade × preço unitário, com o
/// sinal dado pelo tipo (`in` soma, `out` subtrai). A mesma função serve a
/// linha da listagem e os totais de período.
///
/// Quantidade zero ou preço negativo são erro de integridade do dado, nunca
/// ajuste silencioso.
pub fn line_value(movement: &StockMovement) -> Result<Decimal, AppError> {
    if movement.quantity == 0 {
        return Err(AppError::DataIntegrity(format!(
            "movimentação {} tem quantidade zero",
            movement.id
        )));
    }
    if movement.unit_price.is_sign_negative() {
        return Err(AppError::DataIntegrity(format!(
            "movimentação {} tem preço unitário negativo ({})",
            movement.id, movement.unit_price
        )));
    }

    let value = Decimal::from(movement.quantity) * movement.unit_price;
    Ok(match movement.movement_type {
        MovementType::In => value,
        MovementType::Out => -value,
    })
}

/// Total de um período. Movimentação que viola integridade é pulada e
/// logada; um registro podre não derruba o agregado inteiro.
pub fn period_total(movements: &[StockMovement]) -> Decimal {
    movements
        .iter()
        .filter_map(|movement| match line_value(movement) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!("Movimentação ignorada no total do período: {err}");
                None
            }
        })
        .sum()
}

/// Arredondamento de apresentação (2 casas). Internamente tudo roda em
/// precisão cheia; só a borda visual arredonda.
pub fn round_display(value: Decimal) -> Decimal {
    value.round_dp(2)
}
