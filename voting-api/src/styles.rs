pub const CSS: &str = r#"
:root {
    --base: #faf4ed;
    --surface: #fffaf3;
    --overlay: #f2e9e1;
    --muted: #9893a5;
    --subtle: #797593;
    --text: #575279;
    --love: #b4637a;
    --gold: #ea9d34;
    --pine: #286983;
    --foam: #56949f;
}
* { box-sizing: border-box; margin: 0; padding: 0; }
body {
    font-family: 'Inter', -apple-system, 'PingFang TC', 'Noto Sans TC', sans-serif;
    background: var(--base);
    color: var(--text);
    min-height: 100vh;
}
.container { max-width: 760px; margin: 0 auto; padding: 1.5rem; }

.hero { text-align: center; padding: 1rem 0 2rem; }
.hero__bar { display: flex; justify-content: space-between; align-items: center; margin-bottom: 2rem; }
.hero__title { font-size: clamp(2rem, 5vw, 2.75rem); color: var(--pine); font-weight: 800; margin-bottom: 0.5rem; }
.hero__subtitle { color: var(--subtle); font-size: 1.05rem; max-width: 520px; margin: 0 auto; }

.button {
    display: inline-flex; align-items: center; justify-content: center; gap: 0.25rem;
    padding: 0.65rem 1.25rem; border-radius: 8px; border: 2px solid transparent;
    font-size: 0.95rem; font-weight: 600; cursor: pointer; text-decoration: none;
}
.button:disabled { opacity: 0.55; cursor: not-allowed; }
.button--primary { background: var(--pine); color: var(--base); }
.button--primary:hover:not(:disabled) { opacity: 0.9; }
.button--outline { background: var(--surface); color: var(--text); border-color: var(--overlay); }
.button--outline:hover:not(:disabled) { border-color: var(--muted); }
.button--ghost { background: transparent; color: var(--subtle); }
.button--small { padding: 0.4rem 0.8rem; font-size: 0.85rem; }
.button--icon { padding: 0.4rem 0.7rem; }
.button--block { width: 100%; }

.auth__user { display: flex; align-items: center; gap: 0.6rem; }
.auth__name { font-weight: 600; }
.avatar { width: 32px; height: 32px; border-radius: 50%; object-fit: cover; }
.avatar--fallback {
    display: inline-flex; align-items: center; justify-content: center;
    background: var(--foam); color: var(--base); font-weight: 700;
}

.notice {
    display: flex; justify-content: space-between; align-items: flex-start; gap: 1rem;
    border-radius: 8px; padding: 1rem 1.25rem; margin-bottom: 1.25rem; border: 2px solid;
}
.notice--success { background: #e6f2f0; border-color: var(--foam); }
.notice--error { background: #fce8ec; border-color: var(--love); }
.notice__title { font-weight: 700; margin-bottom: 0.25rem; }
.notice__close { background: none; border: none; font-size: 1.25rem; cursor: pointer; color: var(--subtle); }

.toolbar { display: flex; justify-content: center; margin-bottom: 1.5rem; }
.tabs { display: flex; gap: 0.5rem; border-bottom: 2px solid var(--overlay); margin: 1.5rem 0 1rem; }
.tabs__tab {
    background: none; border: none; padding: 0.6rem 1rem; cursor: pointer;
    color: var(--subtle); font-weight: 600; border-bottom: 3px solid transparent; margin-bottom: -2px;
}
.tabs__tab--active { color: var(--pine); border-bottom-color: var(--pine); }

.card {
    background: var(--surface); border: 2px solid var(--overlay);
    border-radius: 12px; padding: 1.5rem; margin-bottom: 1.25rem;
}
.card__title { color: var(--pine); font-size: 1.25rem; margin-bottom: 1rem; }
.field { display: flex; flex-direction: column; gap: 0.4rem; margin-bottom: 1rem; }
.field__label { font-weight: 600; font-size: 0.9rem; }
.input {
    width: 100%; padding: 0.65rem 0.9rem; border: 2px solid var(--overlay);
    border-radius: 8px; background: var(--base); color: var(--text); font-size: 0.95rem; font-family: inherit;
}
.input:focus { outline: none; border-color: var(--pine); }
.input::placeholder { color: var(--muted); }
.input--area { resize: vertical; }
.poll-form__option { display: flex; gap: 0.5rem; margin-bottom: 0.5rem; }

.poll-list { display: flex; flex-direction: column; }
.poll__header { display: flex; justify-content: space-between; gap: 1rem; }
.poll__title { font-size: 1.2rem; }
.poll__description { color: var(--subtle); margin-top: 0.25rem; }
.poll__badges { display: flex; flex-wrap: wrap; gap: 0.35rem; align-items: flex-start; }
.poll__created { color: var(--muted); font-size: 0.8rem; margin: 0.5rem 0 1rem; }
.badge {
    font-size: 0.75rem; padding: 0.2rem 0.55rem; border-radius: 999px;
    border: 1px solid var(--overlay); color: var(--subtle); white-space: nowrap;
}
.badge--closed { background: var(--love); border-color: var(--love); color: var(--base); }

.ballot__options { display: flex; flex-direction: column; gap: 0.5rem; margin-bottom: 1rem; }
.ballot__option {
    display: flex; align-items: center; gap: 0.6rem; padding: 0.6rem 0.8rem;
    border: 2px solid var(--overlay); border-radius: 8px; cursor: pointer;
}
.ballot__bonus { color: var(--gold); font-weight: 400; }
.ballot__actions { display: flex; gap: 0.5rem; }
.ballot__actions .button { flex: 1; }

.results__summary { display: flex; justify-content: space-between; margin-bottom: 0.75rem; font-size: 0.9rem; }
.results__heading { font-weight: 700; }
.results__total { color: var(--subtle); }
.results__list { list-style: none; margin-bottom: 1rem; }
.results__option { margin-bottom: 0.9rem; }
.results__option--mine .results__text { color: var(--pine); font-weight: 700; }
.results__head { display: flex; justify-content: space-between; margin-bottom: 0.3rem; }
.results__count { color: var(--subtle); font-size: 0.85rem; }
.results__bar { height: 8px; background: var(--overlay); border-radius: 999px; overflow: hidden; }
.results__fill { height: 100%; background: var(--foam); }
.results__option--mine .results__fill { background: var(--pine); }
.results__reasons { list-style: none; margin: 0.4rem 0 0 0.75rem; font-size: 0.85rem; color: var(--subtle); }
.results__reason { padding: 0.15rem 0; }
.results__reason-label { font-weight: 600; }

.empty { text-align: center; color: var(--muted); padding: 2.5rem 0; }
.loading { display: flex; flex-direction: column; align-items: center; padding: 3rem; }
.loading__spinner {
    width: 44px; height: 44px; border: 4px solid var(--overlay);
    border-top-color: var(--gold); border-radius: 50%; animation: spin 1s linear infinite;
}
@keyframes spin { to { transform: rotate(360deg); } }
.loading__text { margin-top: 1rem; color: var(--subtle); font-style: italic; }
.error { background: #fce8ec; border: 2px solid var(--love); border-radius: 8px; padding: 1.25rem; margin: 1rem 0; }
.error__title { color: var(--love); font-weight: 700; margin-bottom: 0.5rem; }
.error__message { color: #8b3d4d; }
.error__retry { margin-top: 1rem; }
"#;
