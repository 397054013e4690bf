use crate::core::deck::{DeckEngine, DeckPhase};
use crate::core::transfer::LandingError;
use crate::models::{
    CardView, MenuDetail, MenuDetailView, MenuItem, PhaseView, Recommendation, Recovery,
    SessionView, Shop, ShopView, SuggestionView, SwipeDirection,
};
use std::time::Instant;
use uuid::Uuid;

const DEFAULT_TITLE: &str = "Recommended ramen";
const DEFAULT_REASON: &str = "Picked to match your taste.";
const SHARE_INTENT_URL: &str = "https://twitter.com/intent/tweet";
const SHARE_TAGS: &str = "#RamenSwipe #RamenQuiz #Ramen";

/// Map an engine snapshot to its renderable view
pub fn session_view(session_id: Uuid, engine: &DeckEngine, now: Instant) -> SessionView {
    let phase = engine.phase();

    let (phase_view, message, recovery) = match phase {
        DeckPhase::Loading => (PhaseView::Loading, Some("Loading menus..."), None),
        DeckPhase::Ready => (PhaseView::Ready, None, None),
        DeckPhase::Completed | DeckPhase::Submitting => (
            PhaseView::Submitting,
            Some("Generating your recommendation..."),
            None,
        ),
        DeckPhase::Submitted => (PhaseView::Completed, None, None),
        DeckPhase::Empty => (
            PhaseView::Empty,
            Some("There are no menus to show."),
            Some(Recovery::ReturnToStart),
        ),
        DeckPhase::LoadFailed => (
            PhaseView::LoadFailed,
            Some("Failed to load menus."),
            Some(Recovery::ReturnToStart),
        ),
    };

    let progress = (phase == DeckPhase::Ready)
        .then(|| format!("{} / {}", engine.current_index() + 1, engine.len()));

    let overlay = engine.transitioning(now).map(|direction| match direction {
        SwipeDirection::Left => "Pass".to_string(),
        SwipeDirection::Right => "Like!".to_string(),
    });

    SessionView {
        session_id,
        phase: phase_view,
        progress,
        current: engine.current().map(card_view),
        next: engine.upcoming().map(card_view),
        overlay,
        submitting: matches!(phase, DeckPhase::Completed | DeckPhase::Submitting),
        message: message.map(str::to_string),
        recovery,
        redirect: None,
    }
}

pub fn card_view(menu: &MenuItem) -> CardView {
    CardView {
        id: menu.id,
        name: menu.name.clone(),
        genre_name: menu.genre_name.clone(),
        noodle_name: menu.noodle_name.clone(),
        soup_name: menu.soup_name.clone(),
        image: menu.image_url.clone(),
    }
}

/// "genre - soup soup - noodle"
pub fn summary_line(menu: &MenuItem) -> String {
    format!("{} - {} soup - {}", menu.genre_name, menu.soup_name, menu.noodle_name)
}

fn shop_view(shop: &Shop) -> ShopView {
    ShopView {
        name: shop.name.clone(),
        address: shop.address.clone(),
        map_url: shop.google_map_url.clone().filter(|url| !url.is_empty()),
    }
}

/// Landing page state for a decode outcome
pub fn suggestion_view(outcome: &Result<Recommendation, LandingError>, page_url: &str) -> SuggestionView {
    match outcome {
        Ok(recommendation) => {
            let menu = &recommendation.recommended_menu;
            let title = if menu.item.name.is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                menu.item.name.clone()
            };
            let reason = if recommendation.reason.trim().is_empty() {
                DEFAULT_REASON.to_string()
            } else {
                recommendation.reason.clone()
            };

            SuggestionView::Loaded {
                id: menu.item.id,
                title,
                summary: summary_line(&menu.item),
                image: menu.item.image_url.clone(),
                shop: menu.shop.as_ref().map(shop_view),
                reason,
                share_url: share_intent_url(recommendation, page_url),
                recovery: Recovery::TryAgain,
            }
        }
        Err(e) => SuggestionView::Error {
            message: e.to_string(),
            recovery: Recovery::ReturnToStart,
        },
    }
}

/// X/Twitter share intent for a recommendation result
pub fn share_intent_url(recommendation: &Recommendation, page_url: &str) -> String {
    let menu = &recommendation.recommended_menu;
    let shop_name = menu
        .shop
        .as_ref()
        .map(|shop| shop.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("the shop");

    let text = format!(
        "My ramen match is \"{}\"!\n\n📍 {}\n🥢 {}\n\n{}\n\n",
        menu.item.name,
        shop_name,
        summary_line(&menu.item),
        SHARE_TAGS,
    );

    format!(
        "{}?text={}&url={}",
        SHARE_INTENT_URL,
        urlencoding::encode(&text),
        urlencoding::encode(page_url)
    )
}

pub fn menu_detail_view(detail: &MenuDetail) -> MenuDetailView {
    MenuDetailView {
        id: detail.item.id,
        title: detail.item.name.clone(),
        summary: summary_line(&detail.item),
        image: detail.item.image_url.clone(),
        shop: shop_view(&detail.shop),
        recovery: Recovery::ReturnToStart,
    }
}
