//! User-facing failure messages.

use cart_core::CartError;
use serde::{Deserialize, Serialize};

/// The three cart operations, for message selection and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    AddProduct,
    RemoveProduct,
    UpdateProductAmount,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::AddProduct => "add_product",
            Operation::RemoveProduct => "remove_product",
            Operation::UpdateProductAmount => "update_product_amount",
        }
    }
}

/// Texts shown to the shopper when an operation fails.
///
/// Exactly one message is emitted per failure: the out-of-stock text when
/// stock is short, the operation's generic text for anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Requested quantity exceeds available stock.
    pub out_of_stock: String,
    /// Generic add failure.
    pub add_failed: String,
    /// Generic remove failure.
    pub remove_failed: String,
    /// Generic quantity-update failure.
    pub update_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            out_of_stock: "Quantidade solicitada fora de estoque".to_string(),
            add_failed: "Erro na adição do produto".to_string(),
            remove_failed: "Erro na remoção do produto".to_string(),
            update_failed: "Erro na alteração de quantidade do produto".to_string(),
        }
    }
}

impl Messages {
    /// Pick the message for a failed operation.
    pub fn for_failure(&self, operation: Operation, error: &CartError) -> &str {
        if error.is_out_of_stock() {
            return &self.out_of_stock;
        }
        match operation {
            Operation::AddProduct => &self.add_failed,
            Operation::RemoveProduct => &self.remove_failed,
            Operation::UpdateProductAmount => &self.update_failed,
        }
    }
}
