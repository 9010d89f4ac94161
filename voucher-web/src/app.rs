//! Application components.

use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use voucher_core::format::count_label;
use voucher_core::suggestion::{show_more_label, visible_suggestions};
use voucher_core::{AiSuggestion, Code, SuggestionId};
use voucher_data::ApiClient;
use voucher_search::{FeedbackActions, Layout, SearchOrchestrator, SearchState};

use crate::clipboard::BrowserClipboard;

const POPULAR_BRANDS: [&str; 4] = ["Amazon Prime", "NordVPN", "Spotify", "Skillshare"];

/// How long the copy button reads "Copied!".
const COPIED_RESET: Duration = Duration::from_secs(2);

type Orchestrator = Rc<SearchOrchestrator<Rc<ApiClient>>>;
type Actions = StoredValue<Rc<FeedbackActions<ApiClient>>, LocalStorage>;

// ============================================================================
// App Component
// ============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let api = Rc::new(ApiClient::from_env());
    let state = RwSignal::new(SearchState::default());

    let orchestrator: StoredValue<Orchestrator, LocalStorage> = StoredValue::new_local(Rc::new(
        SearchOrchestrator::new(Rc::clone(&api)).with_observer(move |s| state.set(s.clone())),
    ));
    let actions: Actions = StoredValue::new_local(Rc::new(FeedbackActions::new(api)));

    let on_search = Callback::new(move |brand: String| {
        let orchestrator = orchestrator.get_value();
        spawn_local(async move {
            orchestrator.search(&brand).await;
        });
    });

    view! {
        <Meta name="description" content="Discount codes from creators and smarter ways to save"/>
        <Title text="VoucherFinder"/>

        <Header/>
        <main>
            <SearchBar on_search state/>
            <ErrorBanner state/>
            <Results state actions/>
        </main>
        <Footer/>
    }
}

// ============================================================================
// Layout Components
// ============================================================================

#[component]
fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"VoucherFinder"</h1>
            <p>"Working discount codes and AI-powered saving strategies"</p>
            <div class="features">
                <span>"✓ Verified Codes"</span>
                <span>"✓ AI-Powered Suggestions"</span>
                <span>"✓ YouTube + Coupon Sites"</span>
            </div>
        </header>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer>
            <p>"Made for finding better deals. Creators are always credited."</p>
        </footer>
    }
}

// ============================================================================
// Search
// ============================================================================

#[component]
fn SearchBar(on_search: Callback<String>, state: RwSignal<SearchState>) -> impl IntoView {
    let (input, set_input) = signal(String::new());
    let loading = move || state.with(|s| s.loading);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        on_search.run(input.get_untracked());
    };
    let pick = move |brand: &'static str| {
        set_input.set(brand.to_string());
        on_search.run(brand.to_string());
    };

    view! {
        <form class="search-bar" on:submit=submit>
            <input
                type="text"
                placeholder="Search for a brand, e.g. NordVPN"
                prop:value=input
                on:input=move |ev| set_input.set(event_target_value(&ev))
                disabled=loading
            />
            <button
                type="submit"
                class="btn"
                disabled=move || loading() || input.with(|i| i.trim().is_empty())
            >
                {move || if loading() { "Searching..." } else { "Search" }}
            </button>
        </form>
        <div class="popular-brands">
            <p>"Popular searches:"</p>
            {POPULAR_BRANDS.into_iter().map(move |brand| view! {
                <button class="brand-chip" disabled=loading on:click=move |_| pick(brand)>
                    {brand}
                </button>
            }).collect::<Vec<_>>()}
        </div>
    }
}

#[component]
fn ErrorBanner(state: RwSignal<SearchState>) -> impl IntoView {
    move || {
        state.with(|s| s.error.clone()).map(|message| view! {
            <div class="error-banner" role="alert">
                <p>"⚠ " {message}</p>
            </div>
        })
    }
}

/// Everything below the search bar.
///
/// Rebuilt only when the panel changes; a new search passes through
/// `Layout::Loading` and so starts from fresh cards.
#[component]
fn Results(state: RwSignal<SearchState>, actions: Actions) -> impl IntoView {
    let layout = Memo::new(move |_| state.with(|s| s.layout()));

    move || match layout.get() {
        Layout::Welcome => view! { <Welcome/> }.into_any(),
        Layout::Loading => view! { <LoadingSkeletons/> }.into_any(),
        Layout::Empty => {
            let brand = state.with_untracked(|s| s.query.clone());
            view! { <EmptyState brand/> }.into_any()
        }
        Layout::Results => view! { <ResultSections state actions/> }.into_any(),
    }
}

/// Suggestions and codes, each re-rendered only when its own data changes.
#[component]
fn ResultSections(state: RwSignal<SearchState>, actions: Actions) -> impl IntoView {
    let codes = Memo::new(move |_| state.with(|s| s.codes.clone()));
    let suggestions = Memo::new(move |_| state.with(|s| s.suggestions.clone()));
    let loading = Memo::new(move |_| state.with(|s| s.loading));

    view! {
        {move || {
            let suggestions = suggestions.get();
            (!suggestions.is_empty()).then(|| view! {
                <AiSuggestionsCard suggestions actions/>
            })
        }}
        <Show when=move || loading.get()>
            <SuggestionsSkeleton/>
        </Show>
        {move || {
            let codes = codes.get();
            let brand = state.with_untracked(|s| s.query.clone());
            (!codes.is_empty()).then(|| view! {
                <CodeGrid brand codes actions/>
            })
        }}
    }
}

// ============================================================================
// Code Components
// ============================================================================

#[component]
fn CodeGrid(brand: String, codes: Vec<Code>, actions: Actions) -> impl IntoView {
    let found = count_label(codes.len() as u64, "code", "codes");

    view! {
        <section class="code-grid">
            <h2>"Discount Codes for " {brand}</h2>
            <p class="subtitle">"Found " {found} " from multiple sources"</p>
            <div class="codes">
                {codes.into_iter().map(|code| view! {
                    <CodeCard code actions/>
                }).collect::<Vec<_>>()}
            </div>
        </section>
    }
}

#[component]
fn CodeCard(code: Code, actions: Actions) -> impl IntoView {
    let copied = RwSignal::new(false);
    let now = chrono::Utc::now().naive_utc();

    let status = code.status;
    let discount = code.discount_display();
    let source = code.source_display().to_string();
    let youtube = code.is_youtube();
    let posted = code.found_label(now);
    let used_by = code.uses_display();
    let source_url = code.source_url.clone();
    let text = code.code.clone();

    let on_copy = move |_: leptos::ev::MouseEvent| {
        let actions = actions.get_value();
        let code = code.clone();
        spawn_local(async move {
            if let Ok(tracking) = actions.copy_code(&BrowserClipboard, &code).await {
                // The card may be gone by the time either write lands.
                copied.try_set(true);
                set_timeout(
                    move || {
                        copied.try_set(false);
                    },
                    COPIED_RESET,
                );
                spawn_local(tracking);
            }
        });
    };

    view! {
        <div class="code-card">
            <div class="code-header">
                <span class="label">"CODE:"</span>
                <span class=format!("status {}", status.css_class())>{status.badge()}</span>
            </div>
            <div class="code-value">{text}</div>
            {discount.map(|d| view! { <p class="discount">{d}</p> })}
            <dl class="code-details">
                <div>
                    <dt>"Source:"</dt>
                    <dd>{youtube.then_some("▶ ")} {source}</dd>
                </div>
                {posted.map(|p| view! {
                    <div>
                        <dt>"Posted:"</dt>
                        <dd>{p}</dd>
                    </div>
                })}
                {used_by.map(|u| view! {
                    <div>
                        <dt>"Used by:"</dt>
                        <dd>{u}</dd>
                    </div>
                })}
            </dl>
            <button
                class="btn copy"
                class:copied=move || copied.get()
                on:click=on_copy
            >
                {move || if copied.get() { "✓ Copied!" } else { "Copy Code" }}
            </button>
            {source_url.map(|href| view! {
                <a class="source-link" href=href target="_blank" rel="noopener noreferrer">
                    "View Source →"
                </a>
            })}
        </div>
    }
}

// ============================================================================
// Suggestion Components
// ============================================================================

#[component]
fn AiSuggestionsCard(suggestions: Vec<AiSuggestion>, actions: Actions) -> impl IntoView {
    let expanded = RwSignal::new(false);
    let verified = RwSignal::new(actions.with_value(|a| a.verified_ids()));
    let total = suggestions.len();
    let suggestions = StoredValue::new(suggestions);

    let on_verify = move |id: SuggestionId, worked: bool| {
        let actions = actions.get_value();
        spawn_local(async move {
            if actions.verify(id, worked).await {
                verified.try_set(actions.verified_ids());
            }
        });
    };

    view! {
        <section class="suggestions">
            <h2>"Smart Saving Strategies"</h2>
            <p class="subtitle">"Alternative ways to save beyond voucher codes"</p>
            <div class="suggestion-list">
                {move || suggestions.with_value(move |all| {
                    visible_suggestions(all, expanded.get())
                        .iter()
                        .cloned()
                        .map(move |suggestion| {
                            let id = suggestion.id;
                            let done = move || verified.with(|ids| ids.contains(&id));
                            view! {
                                <SuggestionItem suggestion>
                                    {move || if done() {
                                        view! { <span class="thanks">"Thanks for feedback!"</span> }.into_any()
                                    } else {
                                        view! {
                                            <div class="verify-buttons">
                                                <button
                                                    class="btn worked"
                                                    aria-label="Mark suggestion as worked"
                                                    on:click=move |_| on_verify(id, true)
                                                >
                                                    "Worked"
                                                </button>
                                                <button
                                                    class="btn didnt-work"
                                                    aria-label="Mark suggestion as didn't work"
                                                    on:click=move |_| on_verify(id, false)
                                                >
                                                    "Didn't Work"
                                                </button>
                                            </div>
                                        }.into_any()
                                    }}
                                </SuggestionItem>
                            }
                        })
                        .collect::<Vec<_>>()
                })}
            </div>
            {move || show_more_label(total, expanded.get()).map(|label| view! {
                <button class="show-more" on:click=move |_| expanded.update(|e| *e = !*e)>
                    {label}
                </button>
            })}
        </section>
    }
}

/// One suggestion; `children` holds the verify controls.
#[component]
fn SuggestionItem(suggestion: AiSuggestion, children: Children) -> impl IntoView {
    let type_label = suggestion.type_label();
    let safe = suggestion.risk_level.is_safe();
    let savings = suggestion.savings_display();
    let savings_note = suggestion.estimated_savings_description.clone();
    let verification = suggestion.verification_display();
    let confidence = suggestion.confidence_display();

    view! {
        <div class="suggestion">
            <div class="suggestion-header">
                <div>
                    <h3>{suggestion.title}</h3>
                    <span class="type-chip">{type_label}</span>
                </div>
                {safe.then(|| view! { <span class="safe-badge">"Verified Safe"</span> })}
            </div>
            <p class="description">{suggestion.description}</p>
            {savings.map(|s| view! {
                <div class="savings">
                    {s}
                    {savings_note.map(|note| view! { <span class="savings-note">{note}</span> })}
                </div>
            })}
            {suggestion.conditions.map(|c| view! {
                <p class="conditions"><strong>"Requirements: "</strong>{c}</p>
            })}
            {suggestion.pro_tip.map(|tip| view! {
                <p class="pro-tip"><strong>"Tip: "</strong>{tip}</p>
            })}
            <div class="verification">
                <span>
                    {verification}
                    {confidence.map(|c| view! { <span class="confidence">{c}</span> })}
                </span>
                {children()}
            </div>
        </div>
    }
}

// ============================================================================
// Empty and Welcome States
// ============================================================================

#[component]
fn EmptyState(brand: String) -> impl IntoView {
    view! {
        <div class="empty-state">
            <h3>"No vouchers found for " {brand}</h3>
            <p>"We couldn't find any discount codes for this brand yet."</p>
            <p class="hint">"Suggestions:"</p>
            <ul>
                <li>"Check the spelling of the brand name"</li>
                <li>"Try a different brand"</li>
                <li>"Check back later as we update regularly"</li>
            </ul>
        </div>
    }
}

#[component]
fn Welcome() -> impl IntoView {
    view! {
        <div class="welcome">
            <h2>"Welcome to VoucherFinder!"</h2>
            <p>"Search for any brand to discover working discount codes and AI-powered saving strategies."</p>
            <div class="welcome-features">
                <div>
                    <h3>"Multi-Source Search"</h3>
                    <p>"We search YouTube, RetailMeNot, and more to find the best codes."</p>
                </div>
                <div>
                    <h3>"AI Suggestions"</h3>
                    <p>"Get smart strategies like free trials and student discounts."</p>
                </div>
                <div>
                    <h3>"Verified Codes"</h3>
                    <p>"See which codes are working and verified by other users."</p>
                </div>
            </div>
        </div>
    }
}

// ============================================================================
// Skeleton Components (Loading States)
// ============================================================================

#[component]
fn LoadingSkeletons() -> impl IntoView {
    view! {
        <SuggestionsSkeleton/>
        <div class="codes">
            <CodeCardSkeleton/>
            <CodeCardSkeleton/>
            <CodeCardSkeleton/>
        </div>
    }
}

#[component]
fn SuggestionsSkeleton() -> impl IntoView {
    view! {
        <div class="suggestions">
            <div class="skeleton" style="width: 40%; height: 1.75rem; margin-bottom: 1rem;"></div>
            <div class="skeleton" style="width: 100%; height: 6rem; margin-bottom: 0.5rem;"></div>
            <div class="skeleton" style="width: 100%; height: 6rem;"></div>
        </div>
    }
}

#[component]
fn CodeCardSkeleton() -> impl IntoView {
    view! {
        <div class="code-card">
            <div class="skeleton" style="width: 30%; height: 1rem; margin-bottom: 1rem;"></div>
            <div class="skeleton" style="width: 100%; height: 3rem; margin-bottom: 1rem;"></div>
            <div class="skeleton" style="width: 60%; height: 1rem; margin-bottom: 0.5rem;"></div>
            <div class="skeleton" style="width: 100%; height: 2.5rem;"></div>
        </div>
    }
}
