pub const SONG_RESULT_STYLES: &str = r#"
.song-result {
    display: grid;
    grid-template-columns: 1fr 1fr;
    gap: 2rem;
    max-width: 60rem;
    margin: 0 auto;
    padding: 2rem 1rem;
}

.song-result-info { display: flex; flex-direction: column; gap: 0.75rem; }
.song-result-lead { font-size: 1.2rem; font-weight: 600; margin: 0; }
.song-result-sub { color: var(--text-secondary, #777); margin: 0; }

/* ── Emotions ── */
.song-emotion { display: flex; align-items: center; gap: 0.5rem; }
.song-emotion-dot { width: 0.9rem; height: 0.9rem; border-radius: 50%; display: inline-block; }
.song-emotion-label { font-weight: 600; }
.song-emotion-description { font-size: 0.85rem; color: var(--text-secondary, #777); }

/* ── Player ── */
.song-result-player {
    display: flex;
    flex-direction: column;
    align-items: center;
    justify-content: center;
    gap: 1rem;
}

.song-result-title { margin: 0; }

.song-play-btn {
    width: 7rem;
    height: 7rem;
    border-radius: 50%;
    border: none;
    background: var(--accent-bg, #6b5bd6);
    color: #fff;
    font-size: 1rem;
    cursor: pointer;
}

/* ── Actions ── */
.song-result-actions,
.song-metadata-actions {
    grid-column: 1 / -1;
    display: flex;
    justify-content: flex-end;
    gap: 0.5rem;
}

.song-action-btn {
    padding: 0.5rem 1.25rem;
    border: none;
    border-radius: 0.25rem;
    background: var(--accent-bg, #6b5bd6);
    color: #fff;
    cursor: pointer;
}

.song-action-btn.secondary {
    background: transparent;
    color: inherit;
    border: 1px solid var(--border-color, #ddd);
}

.song-action-btn:disabled { opacity: 0.5; cursor: default; }

/* ── Metadata ── */
.song-metadata {
    grid-column: 1 / -1;
    display: flex;
    flex-direction: column;
    gap: 0.5rem;
    padding: 1rem;
    border: 1px solid var(--border-color, #ddd);
    border-radius: 0.5rem;
}

.song-metadata-label { font-size: 0.8rem; color: var(--text-secondary, #777); }
.song-metadata-title { padding: 0.5rem; font-size: 1rem; }

.song-genre-grid { display: flex; flex-wrap: wrap; gap: 0.4rem; }

.song-genre {
    padding: 0.3rem 0.75rem;
    border-radius: 1rem;
    border: 1px solid var(--border-color, #ddd);
    background: transparent;
    cursor: pointer;
}

.song-genre.selected {
    background: var(--accent-bg, #6b5bd6);
    border-color: var(--accent-bg, #6b5bd6);
    color: #fff;
}

.song-genre:disabled { opacity: 0.4; cursor: default; }
"#;
