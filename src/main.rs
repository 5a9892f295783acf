//! Verb Defense entry point
//!
//! Browser build: DOM selection flow, canvas drawing and a
//! `requestAnimationFrame` loop. Native build: a headless run with a scripted
//! quiz player, useful for balance checks.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::{Rc, Weak};

    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, EventTarget, HtmlButtonElement,
        HtmlCanvasElement, HtmlElement, HtmlImageElement, HtmlInputElement, KeyboardEvent,
        Response,
    };

    use verb_defense::assets::{SpriteSlot, SpriteTable, required_sprites};
    use verb_defense::platform::{FrameScheduler, GameRunner};
    use verb_defense::quiz::{QuizDeck, QuizGate, VerbRecord, VerbSelection, VerbType, parse_verbs};
    use verb_defense::sim::snapshot::{OutcomeText, RenderSnapshot};
    use verb_defense::sim::{GameEvent, GamePhase, GameSession, Outcome, PlayArea};
    use verb_defense::{DifficultyId, GameConfig, GameError, SelectionError};

    /// `requestAnimationFrame` behind the frame loop
    struct BrowserScheduler {
        window: web_sys::Window,
        app: Weak<RefCell<App>>,
    }

    impl FrameScheduler for BrowserScheduler {
        type Handle = i32;

        fn request_frame(&mut self, generation: u64) -> Option<i32> {
            let app = self.app.clone();
            let callback = Closure::once_into_js(move |time: f64| {
                if let Some(app) = app.upgrade() {
                    on_frame(&app, generation, time);
                }
            });
            self.window
                .request_animation_frame(callback.unchecked_ref())
                .map_err(|e| log::warn!("requestAnimationFrame failed: {:?}", e))
                .ok()
        }

        fn cancel_frame(&mut self, handle: i32) {
            let _ = self.window.cancel_animation_frame(handle);
        }
    }

    /// Choices made on the selection screen
    #[derive(Default)]
    struct Selection {
        tense: Option<String>,
        verb_type: Option<VerbType>,
        difficulty: Option<DifficultyId>,
    }

    struct App {
        document: Document,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        runner: GameRunner<BrowserScheduler>,
        verbs: Vec<VerbRecord>,
        selection: Selection,
        quiz: Option<QuizGate>,
        sprites: SpriteTable,
        images: BTreeMap<String, HtmlImageElement>,
    }

    impl App {
        fn element(&self, id: &str) -> Option<Element> {
            self.document.get_element_by_id(id)
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.element(id) {
                let classes = el.class_list();
                let _ = if hidden {
                    classes.add_1("hidden")
                } else {
                    classes.remove_1("hidden")
                };
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.element(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_message(&self, text: &str, class: &str) {
            if let Some(el) = self.element("minigame-message") {
                el.set_text_content(Some(text));
                el.set_class_name(class);
            }
        }

        fn update_start_button(&self) {
            if let Some(button) = self
                .element("start-game-button")
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
            {
                let ready =
                    self.selection.verb_type.is_some() && self.selection.difficulty.is_some();
                button.set_disabled(!ready);
            }
        }

        /// Filter the verb list and start a run. On error nothing changes on
        /// screen except the selection error line.
        fn start_game(&mut self) -> Result<(), GameError> {
            let Some(difficulty) = self.selection.difficulty else {
                return Err(SelectionError::NoDifficulty.into());
            };
            let selection = VerbSelection::new(
                self.selection.tense.clone().unwrap_or_default(),
                self.selection.verb_type.unwrap_or_default(),
            );
            let deck = QuizDeck::from_selection(&self.verbs, &selection)?;

            // The canvas only has a layout size once its container is shown
            self.set_hidden("app-container", false);
            let width = self.canvas.client_width().max(1) as u32;
            let height = self.canvas.client_height().max(1) as u32;

            let seed = js_sys::Date::now() as u64;
            let area = PlayArea::new(width as f32, height as f32);
            if let Err(e) = self.runner.start(difficulty, area, seed) {
                log::error!("Cannot start run: {}", e);
                self.set_hidden("app-container", true);
                return Err(e.into());
            }

            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.set_hidden("selection-overlay", true);
            self.quiz = Some(QuizGate::new(deck, seed.wrapping_add(1)));
            self.show_question();
            Ok(())
        }

        fn show_question(&self) {
            let Some(quiz) = &self.quiz else { return };
            let question = quiz.current();
            self.set_text("verb", &format!("\"{}\"", question.verb));
            self.set_text("tense", &question.tense);
            self.set_text("pronoun", &question.pronoun);
            self.set_message("", "");
            if let Some(input) = self.answer_input() {
                input.set_value("");
                let _ = input.focus();
            }
        }

        fn answer_input(&self) -> Option<HtmlInputElement> {
            self.element("answer-input")?.dyn_into().ok()
        }

        fn submit_answer(&mut self) {
            if self.runner.session().phase() != GamePhase::Running {
                return;
            }
            let input = self.answer_input().map(|i| i.value()).unwrap_or_default();
            let Some(quiz) = self.quiz.as_mut() else { return };
            let result = quiz.submit(&input);
            if result.is_correct() {
                self.runner.session_mut().on_correct_answer();
                self.show_question();
                self.set_message(result.message(), "text-success");
            } else {
                self.set_message(result.message(), "text-error");
                self.clear_message_later(result.message(), 2000);
            }
        }

        /// Clear the feedback line after `delay_ms` unless it changed since
        fn clear_message_later(&self, expected: &'static str, delay_ms: i32) {
            let (Some(window), Some(el)) = (web_sys::window(), self.element("minigame-message"))
            else {
                return;
            };
            let clear = Closure::once_into_js(move || {
                if el.text_content().as_deref() == Some(expected) {
                    el.set_text_content(None);
                }
            });
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                clear.unchecked_ref(),
                delay_ms,
            );
        }

        /// Back to the selection screen
        fn restart(&mut self) {
            self.runner.reset();
            self.quiz = None;
            self.selection = Selection::default();
            self.set_hidden("game-over-overlay", true);
            self.set_hidden("app-container", true);
            self.set_hidden("type-selection", true);
            self.set_hidden("difficulty-selection", true);
            self.set_hidden("tense-selection", false);
            self.set_hidden("selection-overlay", false);
            self.set_text("selection-error", "");
            if let Ok(buttons) = self.document.query_selector_all(".btn-selected") {
                for i in 0..buttons.length() {
                    if let Some(el) = buttons.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                        let _ = el.class_list().remove_1("btn-selected");
                    }
                }
            }
            self.update_start_button();
        }

        fn handle_events(&self, events: &[GameEvent]) {
            for event in events {
                match event {
                    GameEvent::Victory => self.show_outcome(Outcome::Victory),
                    GameEvent::Defeat => self.show_outcome(Outcome::Defeat),
                    _ => {}
                }
            }
        }

        fn show_outcome(&self, outcome: Outcome) {
            let text = OutcomeText::for_outcome(outcome);
            let score = self
                .runner
                .session()
                .state()
                .map(|s| s.score)
                .unwrap_or_default();
            self.set_text("final-score", &score.to_string());
            if let Ok(Some(el)) = self.document.query_selector(".game-over-title") {
                el.set_text_content(Some(text.title));
            }
            if let Ok(Some(el)) = self.document.query_selector(".game-over-subtitle") {
                el.set_text_content(Some(text.subtitle));
            }
            let class = match outcome {
                Outcome::Victory => "text-success",
                Outcome::Defeat => "text-error",
            };
            self.set_message(text.message, class);
            self.set_hidden("game-over-overlay", false);
        }

        fn draw(&self) {
            let Some(snapshot) = self.runner.session().snapshot() else {
                return;
            };
            draw_snapshot(&self.ctx, &snapshot, &self.sprites, &self.images);
        }
    }

    fn on_frame(app: &Rc<RefCell<App>>, generation: u64, time: f64) {
        let mut app = app.borrow_mut();
        let Some(events) = app.runner.frame(generation, time) else {
            return;
        };
        app.handle_events(&events);
        app.draw();
    }

    fn draw_sprite(
        ctx: &CanvasRenderingContext2d,
        sprites: &SpriteTable,
        images: &BTreeMap<String, HtmlImageElement>,
        sprite: &str,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    ) {
        match sprites.resolve(sprite) {
            SpriteSlot::Image(key) => {
                if let Some(img) = images.get(key) {
                    let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h);
                }
            }
            SpriteSlot::Placeholder { color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(x, y, w, h);
            }
        }
    }

    fn draw_snapshot(
        ctx: &CanvasRenderingContext2d,
        snap: &RenderSnapshot,
        sprites: &SpriteTable,
        images: &BTreeMap<String, HtmlImageElement>,
    ) {
        let (width, height) = (snap.width as f64, snap.height as f64);
        let terrain = snap.terrain_height as f64;
        ctx.clear_rect(0.0, 0.0, width, height);

        // Terrain: grass strip over dirt
        ctx.set_fill_style_str("#556B2F");
        ctx.fill_rect(0.0, height - terrain, width, terrain);
        ctx.set_fill_style_str("#8B4513");
        ctx.fill_rect(0.0, height - terrain + 20.0, width, terrain - 20.0);

        let c = snap.castle.rect;
        let (cx, cy, cw, ch) = (c.x as f64, c.y as f64, c.w as f64, c.h as f64);
        draw_sprite(ctx, sprites, images, snap.castle.sprite, cx, cy, cw, ch);
        let bar_y = cy - 24.0;
        ctx.set_fill_style_str("rgba(15, 23, 42, 0.6)");
        ctx.fill_rect(cx, bar_y, cw, 14.0);
        ctx.set_fill_style_str("#dc2626");
        ctx.fill_rect(cx + 2.0, bar_y + 2.0, cw - 4.0, 10.0);
        ctx.set_fill_style_str("#10b981");
        ctx.fill_rect(
            cx + 2.0,
            bar_y + 2.0,
            (cw - 4.0) * snap.castle.health_fraction as f64,
            10.0,
        );
        ctx.set_stroke_style_str("#1f2937");
        ctx.set_line_width(2.0);
        ctx.stroke_rect(cx, bar_y, cw, 14.0);

        let h = snap.hero.rect;
        draw_sprite(
            ctx,
            sprites,
            images,
            snap.hero.sprite,
            h.x as f64,
            h.y as f64,
            h.w as f64,
            h.h as f64,
        );

        for p in &snap.projectiles {
            let r = p.rect;
            ctx.set_fill_style_str(&format!("rgba(255, 200, 0, {})", p.glow_alpha));
            ctx.fill_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64);
            ctx.set_stroke_style_str("#FFFF00");
            ctx.stroke_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64);
        }

        for m in &snap.monsters {
            let r = m.rect;
            let (x, y, w) = (r.x as f64, r.y as f64, r.w as f64);
            draw_sprite(ctx, sprites, images, &m.sprite, x, y, w, r.h as f64);
            ctx.set_fill_style_str("#dc3545");
            ctx.fill_rect(x, y - 10.0, w, 5.0);
            ctx.set_fill_style_str("#28a745");
            ctx.fill_rect(x, y - 10.0, w * m.health_fraction as f64, 5.0);
        }

        let [castle, goal, score, power] = snap.hud();
        ctx.set_fill_style_str("#000000");
        ctx.set_font("24px Inter, sans-serif");
        ctx.set_text_align("left");
        let _ = ctx.fill_text(&castle, 20.0, 40.0);
        ctx.set_text_align("center");
        let _ = ctx.fill_text(&goal, width / 2.0, 40.0);
        ctx.set_text_align("right");
        let _ = ctx.fill_text(&score, width - 20.0, 40.0);
        ctx.set_font("22px Inter, sans-serif");
        ctx.set_fill_style_str("#FFD700");
        ctx.set_text_align("center");
        let _ = ctx.fill_text(&power, width / 2.0, 72.0);
    }

    fn listen<E, F>(target: &EventTarget, event: &str, handler: F)
    where
        E: wasm_bindgen::convert::FromWasmAbi + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Wire every button matching `selector`; the handler gets the button's
    /// `data-<key>` value
    fn listen_choices<F>(app: &Rc<RefCell<App>>, selector: &str, key: &'static str, handler: F)
    where
        F: Fn(&mut App, &str) + Clone + 'static,
    {
        let document = app.borrow().document.clone();
        let Ok(buttons) = document.query_selector_all(selector) else {
            return;
        };
        let group = selector.to_string();
        for i in 0..buttons.length() {
            let Some(button) = buttons.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let app = app.clone();
            let handler = handler.clone();
            let group = group.clone();
            let this = button.clone();
            listen(&button, "click", move |_: web_sys::Event| {
                let Some(value) = this.dataset().get(key) else {
                    return;
                };
                let mut app = app.borrow_mut();
                if let Ok(all) = app.document.query_selector_all(&group) {
                    for j in 0..all.length() {
                        if let Some(el) = all.get(j).and_then(|n| n.dyn_into::<Element>().ok()) {
                            let _ = el.class_list().remove_1("btn-selected");
                        }
                    }
                }
                let _ = this.class_list().add_1("btn-selected");
                handler(&mut app, &value);
                app.update_start_button();
            });
        }
    }

    fn setup_selection(app: &Rc<RefCell<App>>) {
        listen_choices(app, ".btn-tense", "tense", |app, tense| {
            app.selection.tense = Some(tense.to_string());
            app.set_hidden("tense-selection", true);
            app.set_hidden("type-selection", false);
        });
        listen_choices(app, ".btn-type", "type", |app, value| {
            app.selection.verb_type = value.parse().ok();
            app.set_hidden("difficulty-selection", false);
        });
        listen_choices(app, ".btn-difficulty", "difficulty", |app, value| {
            app.selection.difficulty = value.parse().ok();
        });

        let document = app.borrow().document.clone();
        if let Some(button) = document.get_element_by_id("start-game-button") {
            let app = app.clone();
            listen(&button, "click", move |_: web_sys::Event| {
                let mut app = app.borrow_mut();
                app.set_text("selection-error", "");
                if let Err(e) = app.start_game() {
                    app.set_text("selection-error", &e.to_string());
                }
            });
        }
    }

    fn setup_quiz(app: &Rc<RefCell<App>>) {
        let document = app.borrow().document.clone();
        if let Some(button) = document.get_element_by_id("submit-answer") {
            let app = app.clone();
            listen(&button, "click", move |_: web_sys::Event| {
                app.borrow_mut().submit_answer();
            });
        }
        if let Some(input) = document.get_element_by_id("answer-input") {
            let app = app.clone();
            listen(&input, "keyup", move |event: KeyboardEvent| {
                if event.key() == "Enter" {
                    app.borrow_mut().submit_answer();
                }
            });
        }
        if let Some(button) = document.get_element_by_id("restart-button") {
            let app = app.clone();
            listen(&button, "click", move |_: web_sys::Event| {
                app.borrow_mut().restart();
            });
        }
    }

    fn load_sprites(app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
        let sprites = required_sprites(app.borrow().runner.session().config());
        for sprite in sprites {
            let img = HtmlImageElement::new()?;
            {
                let app = Rc::downgrade(app);
                let key = sprite.clone();
                let onload = Closure::once_into_js(move || {
                    if let Some(app) = app.upgrade() {
                        app.borrow_mut().sprites.record_loaded(key);
                    }
                });
                img.set_onload(Some(onload.unchecked_ref()));
            }
            {
                let app = Rc::downgrade(app);
                let key = sprite.clone();
                let onerror = Closure::once_into_js(move || {
                    if let Some(app) = app.upgrade() {
                        app.borrow_mut().sprites.record_failed(key);
                    }
                });
                img.set_onerror(Some(onerror.unchecked_ref()));
            }
            img.set_src(&sprite);
            app.borrow_mut().images.insert(sprite, img);
        }
        Ok(())
    }

    async fn fetch_verbs(window: &web_sys::Window) -> Result<Vec<VerbRecord>, JsValue> {
        let response: Response = JsFuture::from(window.fetch_with_str("verbs.json"))
            .await?
            .dyn_into()?;
        if !response.ok() {
            return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
        }
        let text = JsFuture::from(response.text()?)
            .await?
            .as_string()
            .unwrap_or_default();
        parse_verbs(&text).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Verb Defense starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        let session =
            GameSession::new(GameConfig::default()).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let app = Rc::new_cyclic(|weak: &Weak<RefCell<App>>| {
            let scheduler = BrowserScheduler {
                window: window.clone(),
                app: weak.clone(),
            };
            RefCell::new(App {
                document: document.clone(),
                canvas,
                ctx,
                runner: GameRunner::new(session, scheduler),
                verbs: Vec::new(),
                selection: Selection::default(),
                quiz: None,
                sprites: SpriteTable::new(),
                images: BTreeMap::new(),
            })
        });

        load_sprites(&app)?;
        setup_selection(&app);
        setup_quiz(&app);
        app.borrow().update_start_button();

        match fetch_verbs(&window).await {
            Ok(verbs) => app.borrow_mut().verbs = verbs,
            Err(e) => {
                log::error!("Failed to load verbs: {:?}", e);
                app.borrow()
                    .set_text("selection-error", "Error al cargar los verbos. Refresca la página.");
            }
        }

        log::info!("Verb Defense ready");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;
    use std::path::{Path, PathBuf};

    use clap::Parser;

    use verb_defense::assets::{SpriteTable, required_sprites};
    use verb_defense::platform::{GameRunner, QueuedScheduler};
    use verb_defense::quiz::{QuizDeck, QuizGate, VerbSelection, VerbType, parse_verbs};
    use verb_defense::sim::snapshot::OutcomeText;
    use verb_defense::sim::{GameEvent, GamePhase, GameSession, PlayArea};
    use verb_defense::{DifficultyId, GameConfig};

    const VERBS: &str = include_str!("../data/verbs.json");
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Simulated time between the scripted player's answers
    const ANSWER_EVERY_MS: f64 = 4000.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// Headless run with a scripted quiz player
    #[derive(Debug, Parser)]
    #[command(author, version, about, long_about = None)]
    pub(crate) struct Args {
        /// Difficulty tier: facil, intermedio or dificil
        #[arg(short, long, default_value_t = DifficultyId::default())]
        pub(crate) difficulty: DifficultyId,

        /// Run seed
        #[arg(short, long, default_value_t = 42)]
        pub(crate) seed: u64,

        /// JSON balance table replacing the built-in one
        #[arg(short, long, value_name = "PATH")]
        pub(crate) config: Option<PathBuf>,
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let args = Args::parse();
        let config = match &args.config {
            Some(path) => GameConfig::from_json(&std::fs::read_to_string(path)?)?,
            None => GameConfig::default(),
        };

        let sprites = SpriteTable::from_results(
            required_sprites(&config)
                .into_iter()
                .map(|s| {
                    let exists = Path::new(&s).exists();
                    (s, exists)
                }),
        );

        let verbs = parse_verbs(VERBS)?;
        let deck = QuizDeck::from_selection(
            &verbs,
            &VerbSelection::new("presente", VerbType::RegularAndIrregular),
        )?;
        let mut quiz = QuizGate::new(deck, args.seed);

        let mut runner = GameRunner::new(GameSession::new(config)?, QueuedScheduler::new());
        runner.start(args.difficulty, PlayArea::default(), args.seed)?;

        let mut now = 0.0;
        let mut next_answer = ANSWER_EVERY_MS;
        let mut frames = 0;
        while let Some((_, generation)) = runner.scheduler_mut().pop() {
            now += FRAME_MS;
            frames += 1;
            if frames > MAX_FRAMES {
                log::warn!("Stopping after {} frames without an outcome", MAX_FRAMES);
                runner.reset();
                break;
            }

            if now >= next_answer {
                next_answer += ANSWER_EVERY_MS;
                let answer = quiz.current().answer().to_string();
                if quiz.submit(&answer).is_correct() {
                    runner.session_mut().on_correct_answer();
                }
            }

            for event in runner.frame(generation, now).unwrap_or_default() {
                match event {
                    GameEvent::CastleHit { lives_remaining } => {
                        log::info!("Castle hit, {} lives left", lives_remaining)
                    }
                    GameEvent::EnemyUnlocked(id) => log::info!("{} joins the attack", id),
                    GameEvent::EnemyRetired(id) => log::info!("{} retires", id),
                    _ => {}
                }
            }
        }

        if let Some(snapshot) = runner.session().snapshot() {
            for line in snapshot.hud() {
                println!("{}", line);
            }
            if let GamePhase::Ended(outcome) = snapshot.phase {
                let text = OutcomeText::for_outcome(outcome);
                println!("{} {}", text.title, text.subtitle);
            }
        }
        let required = required_sprites(runner.session().config());
        let placeholders = sprites.missing(&required);
        if !placeholders.is_empty() {
            log::info!("{} sprites would render as placeholders", placeholders.len());
        }
        log::info!("Simulated {:.1}s in {} frames", now / 1000.0, frames);
        Ok(())
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use clap::Parser;

    use super::headless::Args;
    use verb_defense::DifficultyId;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["verb-defense"]).unwrap();
        assert_eq!(args.difficulty, DifficultyId::Intermedio);
        assert_eq!(args.seed, 42);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_args_parse_difficulty_names() {
        let args = Args::try_parse_from(["verb-defense", "-d", "Difícil", "--seed", "7"]).unwrap();
        assert_eq!(args.difficulty, DifficultyId::Dificil);
        assert_eq!(args.seed, 7);
        assert!(Args::try_parse_from(["verb-defense", "--difficulty", "nightmare"]).is_err());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Verb Defense (native, headless) starting...");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
