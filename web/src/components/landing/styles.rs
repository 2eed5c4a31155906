pub const LANDING_STYLES: &str = r#"
.landing {
    height: 100vh;
    overflow-y: auto;
    scroll-snap-type: y mandatory;
}

.landing-section {
    position: relative;
    min-height: 100vh;
    scroll-snap-align: start;
    display: flex;
    flex-direction: column;
    align-items: center;
    justify-content: center;
    gap: 1rem;
    padding: 2rem 1rem;
    overflow: hidden;
}

/* ── Hero ── */
.landing-circle {
    position: absolute;
    width: 800px;
    height: 800px;
    border-radius: 50%;
    filter: blur(80px);
    opacity: 0.5;
    transform: translate(-50%, -50%);
    z-index: 0;
}

.landing-circle--pink {
    top: 70%;
    left: 35%;
    background: linear-gradient(135deg, #F12FBB 0%, #B2EA6A 100%);
}

.landing-circle--blue {
    top: 50%;
    left: 80%;
    background: linear-gradient(135deg, #2B8DBE 0%, #C06AEA 100%);
}

.landing-hashtags {
    position: relative;
    z-index: 1;
    display: flex;
    flex-direction: column;
    align-items: center;
    gap: 0.75rem;
}

.landing-hashtag-list { display: flex; flex-wrap: wrap; gap: 0.5rem; justify-content: center; }
.landing-hashtag { padding: 0.25rem 0.75rem; border-radius: 1rem; background: rgba(255, 255, 255, 0.6); }
.landing-placeholder { color: var(--text-secondary, #777); }

.landing-cta {
    margin-top: 1rem;
    padding: 0.6rem 1.5rem;
    border: none;
    border-radius: 1.5rem;
    background: var(--accent-bg, #6b5bd6);
    color: #fff;
    cursor: pointer;
}

/* ── Lists ── */
.landing-song-list { list-style: none; padding: 0; display: flex; flex-direction: column; gap: 0.5rem; }
.landing-song-list li { display: flex; gap: 1rem; }
.landing-song-title { font-weight: 600; }
.landing-song-emotions { color: var(--text-secondary, #777); }

.landing-post-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(14rem, 1fr));
    gap: 1rem;
    width: 100%;
    max-width: 60rem;
}

/* ── Dot navigation ── */
.dot-nav {
    position: fixed;
    right: 1.5rem;
    top: 50%;
    transform: translateY(-50%);
    display: flex;
    flex-direction: column;
    gap: 0.75rem;
    z-index: 10;
}

.dot-nav-dot {
    width: 0.75rem;
    height: 0.75rem;
    padding: 0;
    border-radius: 50%;
    border: 1px solid #666;
    background: transparent;
    cursor: pointer;
}

.dot-nav-dot.active { background: #333; }
"#;
