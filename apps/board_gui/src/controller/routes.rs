//! Route model mirroring the hosted board's URL scheme:
//! `orders/delivery/:displayId?`, `orders/dine-in/:displayId?`,
//! `orders/kitchen`. The display id addresses the detail modal.

use client_core::BoardView;
use shared::domain::DisplayId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Delivery { order: Option<DisplayId> },
    DineIn { order: Option<DisplayId> },
    Kitchen,
}

impl Default for Route {
    fn default() -> Self {
        Route::Delivery { order: None }
    }
}

impl Route {
    pub fn view(self) -> BoardView {
        match self {
            Route::Delivery { .. } => BoardView::Delivery,
            Route::DineIn { .. } => BoardView::DineIn,
            Route::Kitchen => BoardView::Kitchen,
        }
    }

    pub fn for_view(view: BoardView) -> Route {
        match view {
            BoardView::Delivery => Route::Delivery { order: None },
            BoardView::DineIn => Route::DineIn { order: None },
            BoardView::Kitchen => Route::Kitchen,
        }
    }

    pub fn selected_order(self) -> Option<DisplayId> {
        match self {
            Route::Delivery { order } | Route::DineIn { order } => order,
            Route::Kitchen => None,
        }
    }

    /// Same view with another (or no) selected order; the kitchen has no
    /// detail modal and ignores the selection.
    pub fn with_order(self, order: Option<DisplayId>) -> Route {
        match self {
            Route::Delivery { .. } => Route::Delivery { order },
            Route::DineIn { .. } => Route::DineIn { order },
            Route::Kitchen => Route::Kitchen,
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        let mut segments = path.split('/').filter(|segment| !segment.is_empty());
        if segments.next()? != "orders" {
            return None;
        }
        let route = match segments.next() {
            // `/orders` lands on the delivery board.
            None => Route::default(),
            Some(view) => {
                let order = match segments.next() {
                    None => None,
                    Some(raw) => Some(DisplayId(raw.parse().ok()?)),
                };
                match view {
                    "delivery" => Route::Delivery { order },
                    "dine-in" => Route::DineIn { order },
                    "kitchen" if order.is_none() => Route::Kitchen,
                    _ => return None,
                }
            }
        };
        if segments.next().is_some() {
            return None;
        }
        Some(route)
    }

    pub fn path(self) -> String {
        match self {
            Route::Delivery { order: None } => "/orders/delivery".to_string(),
            Route::Delivery { order: Some(id) } => format!("/orders/delivery/{}", id.0),
            Route::DineIn { order: None } => "/orders/dine-in".to_string(),
            Route::DineIn { order: Some(id) } => format!("/orders/dine-in/{}", id.0),
            Route::Kitchen => "/orders/kitchen".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_round_trip_through_their_paths() {
        let routes = [
            Route::Delivery { order: None },
            Route::Delivery {
                order: Some(DisplayId(42)),
            },
            Route::DineIn { order: None },
            Route::DineIn {
                order: Some(DisplayId(7)),
            },
            Route::Kitchen,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn bare_orders_path_lands_on_the_delivery_board() {
        assert_eq!(Route::parse("/orders"), Some(Route::default()));
    }

    #[test]
    fn unknown_views_and_trailing_garbage_are_rejected() {
        assert_eq!(Route::parse("/orders/takeout"), None);
        assert_eq!(Route::parse("/orders/delivery/42/extra"), None);
        assert_eq!(Route::parse("/orders/kitchen/42"), None);
        assert_eq!(Route::parse("/menu/1"), None);
        assert_eq!(Route::parse("/orders/delivery/not-a-number"), None);
    }

    #[test]
    fn selection_changes_keep_the_view() {
        let route = Route::DineIn { order: None }.with_order(Some(DisplayId(3)));
        assert_eq!(
            route,
            Route::DineIn {
                order: Some(DisplayId(3))
            }
        );
        assert_eq!(route.with_order(None), Route::DineIn { order: None });
        assert_eq!(Route::Kitchen.with_order(Some(DisplayId(3))), Route::Kitchen);
    }
}
