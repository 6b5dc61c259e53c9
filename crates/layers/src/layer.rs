use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub u64);

pub trait Layer {
    fn id(&self) -> LayerId;
}

/// Ordered set of layers; position in the list is paint order, first painted
/// at the bottom. The set is fixed for the session lifetime.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LayerStack {
    order: Vec<LayerId>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: LayerId) {
        self.order.push(id);
    }

    pub fn order(&self) -> &[LayerId] {
        &self.order
    }

    /// Paint-order index of a layer, bottom-most is 0.
    pub fn index_of(&self, id: LayerId) -> Option<usize> {
        self.order.iter().position(|l| *l == id)
    }
}

#[cfg(test)]
mod tests {
    use super::{LayerId, LayerStack};

    #[test]
    fn paint_order_follows_insertion() {
        let mut stack = LayerStack::new();
        stack.push(LayerId(2));
        stack.push(LayerId(7));
        stack.push(LayerId(1));
        assert_eq!(stack.index_of(LayerId(7)), Some(1));
        assert_eq!(stack.index_of(LayerId(9)), None);
        assert_eq!(stack.order().len(), 3);
    }
}
